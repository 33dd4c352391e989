//! IR UART tasks
//!
//! The IR transceiver sits on a UART; every packet travels as one framed
//! 32-bit word.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};
use portable_atomic::Ordering;

use critter_protocol::{encode_frame, FrameParser, FRAME_LEN};

use crate::channels::{IR_LISTENING, IR_RX, IR_TX};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// IR RX task - parses frames and queues packets for the game
#[embassy_executor::task]
pub async fn ir_rx_task(mut rx: BufferedUartRx) {
    info!("IR RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("IR RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(packet)) => {
                            if !IR_LISTENING.load(Ordering::Acquire) {
                                trace!("Not listening, dropping packet");
                            } else if IR_RX.try_send(packet).is_err() {
                                warn!("IR RX queue full, dropping packet");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => debug!("IR frame error: {}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("IR UART read error: {:?}", e);
            }
        }
    }
}

/// IR TX task - frames queued packets onto the UART
#[embassy_executor::task]
pub async fn ir_tx_task(mut tx: BufferedUartTx) {
    info!("IR TX task started");

    let mut buf = [0u8; FRAME_LEN];

    loop {
        let packet = IR_TX.receive().await;

        let len = match encode_frame(&packet, &mut buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("IR frame encode failed: {}", e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("IR UART write error: {:?}", e);
        }
    }
}
