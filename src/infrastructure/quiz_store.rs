//! 测验存储 - 基础设施层
//!
//! 只负责分配标识和保存/读取记录，不理解题目内容

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;

use crate::error::StoreError;
use crate::models::quiz::{NewQuiz, QuizId, QuizRecord};

/// 测验存储能力
pub trait QuizStore: Send + Sync {
    /// 原子地分配下一个标识
    fn next_id(&self) -> QuizId;

    /// 保存新测验并返回带标识的记录
    fn create(&self, quiz: NewQuiz) -> Result<QuizRecord, StoreError>;

    /// 按标识读取
    fn get(&self, id: QuizId) -> Result<Option<QuizRecord>, StoreError>;
}

/// 进程内存储，进程退出即丢失
#[derive(Debug)]
pub struct InMemoryQuizStore {
    next_id: AtomicU64,
    quizzes: RwLock<HashMap<QuizId, QuizRecord>>,
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            quizzes: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.quizzes.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryQuizStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizStore for InMemoryQuizStore {
    fn next_id(&self) -> QuizId {
        QuizId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn create(&self, quiz: NewQuiz) -> Result<QuizRecord, StoreError> {
        let id = self.next_id();
        let record = QuizRecord::from_new(id, quiz);
        self.quizzes
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(id, record.clone());
        debug!("保存测验 #{}: {}", id, record.title);
        Ok(record)
    }

    fn get(&self, id: QuizId) -> Result<Option<QuizRecord>, StoreError> {
        let quizzes = self.quizzes.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(quizzes.get(&id).cloned())
    }
}
