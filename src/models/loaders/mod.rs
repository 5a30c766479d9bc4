pub mod document_loader;

pub use document_loader::{
    answer_sheet_path, list_documents, load_answer_sheet, read_document_bytes,
};
