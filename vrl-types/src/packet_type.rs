use serde::{Deserialize, Serialize};

/// Тип пакета VITA 49 (4 бита в слове заголовка пакета).
///
/// Коды 0–5 определены стандартом, 6–15 зарезервированы. Зарезервированные
/// коды сохраняются как есть: decode → encode возвращает те же биты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketType {
    /// IF data без Stream ID
    IfData,
    /// IF data со Stream ID — тип, который шлёт NDR
    IfDataWithStreamId,
    /// Extension data без Stream ID
    ExtData,
    /// Extension data со Stream ID
    ExtDataWithStreamId,
    /// IF context
    IfContext,
    /// Extension context
    ExtContext,
    /// Зарезервированные коды 6–15
    Reserved(u8),
}

impl PacketType {
    /// Восстанавливает тип из 4-битного кода.
    pub fn from_bits(v: u8) -> Self {
        match v & 0x0F {
            0 => PacketType::IfData,
            1 => PacketType::IfDataWithStreamId,
            2 => PacketType::ExtData,
            3 => PacketType::ExtDataWithStreamId,
            4 => PacketType::IfContext,
            5 => PacketType::ExtContext,
            other => PacketType::Reserved(other),
        }
    }

    /// 4-битный код для упаковки в слово заголовка.
    pub fn bits(&self) -> u8 {
        match self {
            PacketType::IfData => 0,
            PacketType::IfDataWithStreamId => 1,
            PacketType::ExtData => 2,
            PacketType::ExtDataWithStreamId => 3,
            PacketType::IfContext => 4,
            PacketType::ExtContext => 5,
            PacketType::Reserved(v) => v & 0x0F,
        }
    }
}
