/// Rejections raised while turning external input into a `Challenge`.
///
/// `MalformedInput` and `MissingHeader` mean the text could not be read at all;
/// the remaining variants mean it was readable but describes an invalid instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    MalformedInput { line: usize, reason: String },
    MissingHeader,
    InvalidCapacity { capacity: i64 },
    InvalidWeight { index: usize, weight: i64 },
    InvalidValue { index: usize, value: i64 },
    ItemCountMismatch { declared: usize, found: usize },
}

impl KnapsackError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            KnapsackError::MalformedInput { .. } | KnapsackError::MissingHeader
        )
    }
}

impl std::fmt::Display for KnapsackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KnapsackError::MalformedInput { line, reason } => {
                write!(f, "Malformed input on line {}: {}", line, reason)
            }
            KnapsackError::MissingHeader => {
                write!(f, "Input is empty, expected '<item_count> <capacity>'")
            }
            KnapsackError::InvalidCapacity { capacity } => {
                write!(f, "Capacity '{}' must lie in 0..={}", capacity, u32::MAX)
            }
            KnapsackError::InvalidWeight { index, weight } => write!(
                f,
                "Item {} has weight '{}', weights must lie in 1..={}",
                index,
                weight,
                u32::MAX
            ),
            KnapsackError::InvalidValue { index, value } => write!(
                f,
                "Item {} has value '{}', values must lie in 0..={}",
                index,
                value,
                u32::MAX
            ),
            KnapsackError::ItemCountMismatch { declared, found } => write!(
                f,
                "Header declares {} items but {} were given",
                declared, found
            ),
        }
    }
}

impl std::error::Error for KnapsackError {}

pub type KnapsackResult<T> = std::result::Result<T, KnapsackError>;
