pub mod extractor;
pub mod office_extractor;
pub mod quiz_store;

pub use extractor::{CsvExtractor, ExtractorRegistry, PlainTextExtractor, RawExtractor};
pub use office_extractor::{DocxExtractor, XlsxExtractor};
pub use quiz_store::{InMemoryQuizStore, QuizStore};
