use serde::{Deserialize, Serialize};

/// Формат целочисленной метки времени (TSI, 2 бита).
///
/// Значения стандартные, перекодировке не подлежат.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tsi {
    /// Поле timeSeconds не используется
    None = 0,
    /// Секунды UTC
    Utc = 1,
    /// Секунды GPS
    Gps = 2,
    /// Иная шкала (определяется профилем устройства)
    Other = 3,
}

/// Формат дробной метки времени (TSF, 2 бита).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tsf {
    /// Поле timeFracSeconds не используется
    None = 0,
    /// Счётчик выборок
    SampleCount = 1,
    /// Реальное время в пикосекундах
    RealTime = 2,
    /// Свободно бегущий счётчик
    FreeRunning = 3,
}

impl Tsi {
    pub fn from_bits(v: u8) -> Self {
        match v & 0x03 {
            0 => Tsi::None,
            1 => Tsi::Utc,
            2 => Tsi::Gps,
            _ => Tsi::Other,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8
    }
}

impl Tsf {
    pub fn from_bits(v: u8) -> Self {
        match v & 0x03 {
            0 => Tsf::None,
            1 => Tsf::SampleCount,
            2 => Tsf::RealTime,
            _ => Tsf::FreeRunning,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8
    }
}
