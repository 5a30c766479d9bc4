pub mod default_quiz;
pub mod document;
pub mod loaders;
pub mod question;
pub mod quiz;
pub mod submission;

pub use default_quiz::default_question_set;
pub use document::{CellValue, DocumentFormat, RawDocument, RowRecord};
pub use loaders::{list_documents, load_answer_sheet, read_document_bytes};
pub use question::{AnswerOption, Question, QuestionError, QuestionSet};
pub use quiz::{NewQuiz, QuizId, QuizRecord};
pub use submission::{AnswerEntry, AnswerOutcome, SubmissionResult};
