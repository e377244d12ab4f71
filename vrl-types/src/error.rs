use thiserror::Error;

/// Результат для операций кодека VRL
pub type VitaResult<T> = std::result::Result<T, VitaError>;

/// Типы ошибок кадрирования VITA 49.
///
/// Закрытая таксономия: декодер возвращает только эти четыре исхода,
/// энкодер — только [`VitaError::SizeMismatch`] при неверной длине
/// payload. Никаких других видов ошибок кодек не порождает.
#[derive(Debug, Error)]
pub enum VitaError {
    /// Буфер короче, чем требует очередной шаг разбора
    #[error("truncated frame: need at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// Стартовое слово кадра не равно "VRLP"
    #[error("bad sync word: {found:#010X} (expected VRLP 0x56524C50)")]
    BadSync { found: u32 },

    /// Заявленный размер не совпадает с фактическим
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Трейлер заявлен (T=1), но завершающее слово не равно "VEND"
    #[error("bad frame trailer: {found:#010X} (expected VEND 0x56454E44)")]
    BadTrailer { found: u32 },
}
