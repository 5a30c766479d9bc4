pub mod answer_key;
pub mod scorer;
pub mod table_parser;
pub mod text_parser;

pub use scorer::Scorer;
pub use table_parser::{ColumnResolver, Field, TableFormatParser, COLUMN_RESOLVERS};
pub use text_parser::TextFormatParser;
