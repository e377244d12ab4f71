//! Кодек кадров VRL/VITA 49
//!
//! Эталонная реализация кадрирования потоков I/Q приёмников серии NDR:
//! сборка кадра на передающей стороне и разбор с валидацией на
//! приёмной. Транспорт (UDP-сокеты), управление радио и DSP — внешние
//! слои: кодек работает только с байтовыми буферами.
//!
//! # Быстрый старт
//!
//! ```
//! use vrl_core::{decode_frame, encode_frame, SAMPLES_PER_FRAME};
//! use vrl_types::FrameHeader;
//!
//! let mut header = FrameHeader::new(0x1234);
//! header.time_seconds = 1_700_000_000;
//!
//! let samples = vec![0i16; 2 * SAMPLES_PER_FRAME];
//! let wire = encode_frame(&header, &samples)?;
//!
//! let frame = decode_frame(&wire)?;
//! assert_eq!(frame.header.stream_id, 0x1234);
//! # Ok::<(), vrl_types::VitaError>(())
//! ```
//!
//! Кодек не хранит состояния между вызовами и не блокируется: обе
//! операции — чистые функции над буферами, их можно звать из любого
//! числа потоков без синхронизации.

pub mod decode;
pub mod encode;
pub mod format;

pub use decode::*;
pub use encode::*;
pub use format::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
