use crate::ai::QuizGenerator;
use crate::model::ModelManager;

#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    generator: QuizGenerator,
}

impl AppState {
    pub fn new(mm: ModelManager, generator: QuizGenerator) -> Self {
        Self { mm, generator }
    }

    pub fn mm(&self) -> &ModelManager {
        &self.mm
    }

    pub fn generator(&self) -> &QuizGenerator {
        &self.generator
    }
}
