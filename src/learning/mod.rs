//! Learning paths and per-user step completion
//!
//! Module content is static; progress is a completion cursor stored per
//! (user, module) through a `ProgressStore`.

use crate::error::AppError;
use crate::models::ModuleProgress;
use crate::Result;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod store;

pub use store::{InMemoryProgressStore, ProgressStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub video_id: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub estimated_time: String,
    pub steps: Vec<LearningStep>,
}

impl LearningModule {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }
}

impl ModuleProgress {
    /// Progress restored from a saved cursor.
    pub fn from_cursor(cursor: usize, total_steps: usize) -> Self {
        let current_step = cursor.min(total_steps);
        Self {
            progress_percent: percent_complete(current_step, total_steps),
            current_step,
            completed_steps: current_step,
        }
    }

    pub fn is_step_complete(&self, step_index: usize) -> bool {
        step_index < self.current_step
    }

    /// Step to show next; stays on the last step once everything is done.
    pub fn next_step_index(&self, total_steps: usize) -> usize {
        self.current_step.min(total_steps.saturating_sub(1))
    }

    pub fn is_finished(&self, total_steps: usize) -> bool {
        total_steps > 0 && self.current_step >= total_steps
    }
}

/// Rounded share of completed steps, 0..=100.
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // half away from zero, same as the calculators
    (completed as f64 / total as f64 * 100.0).round() as u8
}

/// Mark `step_index` complete given previously saved progress.
///
/// Completion never moves the cursor backwards, so revisiting an earlier
/// step keeps what was already done.
pub fn complete_step(
    module: &LearningModule,
    previous: &ModuleProgress,
    step_index: usize,
) -> Result<ModuleProgress> {
    let total = module.total_steps();
    if step_index >= total {
        return Err(AppError::invalid(format!(
            "step index {} out of range for module {} ({} steps)",
            step_index, module.id, total
        )));
    }

    let cursor = previous.current_step.max(step_index + 1);
    Ok(ModuleProgress::from_cursor(cursor, total))
}

/// Advance and persist progress for one user.
///
/// The read and the write happen as one store update, so concurrent
/// completions for the same module cannot overwrite each other.
pub async fn record_step_completion(
    store: &dyn ProgressStore,
    user_id: &str,
    module: &LearningModule,
    step_index: usize,
) -> Result<ModuleProgress> {
    let updated = store
        .update(
            user_id,
            module.id,
            &|previous: Option<ModuleProgress>| {
                complete_step(module, &previous.unwrap_or_default(), step_index)
            },
        )
        .await?;

    info!(
        user_id = %user_id,
        module_id = module.id,
        step_index,
        progress_percent = updated.progress_percent,
        "Learning step completed"
    );

    Ok(updated)
}

lazy_static! {
    static ref MODULES: Vec<LearningModule> = builtin_modules();
}

pub fn modules() -> &'static [LearningModule] {
    &MODULES
}

pub fn find_module(id: u32) -> Option<&'static LearningModule> {
    MODULES.iter().find(|m| m.id == id)
}

/// Unknown ids fall back to the first module.
pub fn find_module_or_first(id: u32) -> &'static LearningModule {
    find_module(id).unwrap_or(&MODULES[0])
}

fn step(id: u32, title: &str, description: &str, video_id: &str, duration: &str) -> LearningStep {
    LearningStep {
        id,
        title: title.to_string(),
        description: description.to_string(),
        video_id: video_id.to_string(),
        duration: duration.to_string(),
    }
}

fn builtin_modules() -> Vec<LearningModule> {
    vec![
        LearningModule {
            id: 1,
            title: "Banking Basics".to_string(),
            description: "Learn about different types of bank accounts, how to open an account, and basic banking services.".to_string(),
            estimated_time: "45 mins".to_string(),
            steps: vec![
                step(1, "Introduction to Banking", "Understanding what banks are and why they are important for financial security.", "fTTGALaRZoc", "5 mins"),
                step(2, "Types of Bank Accounts", "Learn about savings accounts, current accounts, and fixed deposits.", "O4-MtfawzAY", "6 mins"),
                step(3, "How to Open a Bank Account", "Step-by-step process to open your first bank account.", "5IHq3CBzDnc", "8 mins"),
                step(4, "Understanding ATM Services", "Learn how to use ATMs safely and effectively.", "NwcO2O_Gv9M", "5 mins"),
                step(5, "Reading Bank Statements", "Understand your bank statements and track your finances.", "AIh2MYj_qsM", "6 mins"),
                step(6, "Digital Banking Basics", "Introduction to online and mobile banking services.", "zvPyqN-FEPQ", "7 mins"),
                step(7, "Banking Security and Fraud Prevention", "Learn how to protect yourself from banking frauds.", "sMDg7ld1tZU", "8 mins"),
                step(8, "Banking for Rural Communities", "Special banking services and schemes for rural areas.", "FvA3Li63TGk", "6 mins"),
            ],
        },
        LearningModule {
            id: 2,
            title: "Saving Strategies".to_string(),
            description: "Discover effective ways to save money, set financial goals, and build an emergency fund.".to_string(),
            estimated_time: "60 mins".to_string(),
            steps: vec![
                step(1, "Why Save Money?", "Understanding the importance of saving for financial security.", "JqYoLQXO7j4", "5 mins"),
                step(2, "Setting Financial Goals", "Learn how to set SMART financial goals to guide your saving efforts.", "3b1g4j5k6l7", "7 mins"),
                step(3, "Emergency Fund", "Understand the importance of emergency savings and how to build it.", "YB1Syuk0pUE", "6 mins"),
                step(4, "Saving Habits", "Develop daily habits that help you save consistently.", "5N4n9oLkJWQ", "5 mins"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        assert_eq!(modules().len(), 2);
        assert_eq!(find_module(1).unwrap().total_steps(), 8);
        assert_eq!(find_module(2).unwrap().total_steps(), 4);
        assert!(find_module(7).is_none());
        assert_eq!(find_module_or_first(7).id, 1);
    }

    #[test]
    fn test_complete_steps_in_order() {
        let module = find_module(2).unwrap();
        let mut progress = ModuleProgress::default();

        progress = complete_step(module, &progress, 0).unwrap();
        assert_eq!(progress.progress_percent, 25);
        assert_eq!(progress.next_step_index(4), 1);

        for i in 1..4 {
            progress = complete_step(module, &progress, i).unwrap();
        }
        assert_eq!(progress.progress_percent, 100);
        assert_eq!(progress.completed_steps, 4);
        assert!(progress.is_finished(4));
        // stays on the last step
        assert_eq!(progress.next_step_index(4), 3);
    }

    #[test]
    fn test_revisiting_keeps_progress() {
        let module = find_module(1).unwrap();
        let progress = ModuleProgress::from_cursor(5, 8);
        let revisited = complete_step(module, &progress, 1).unwrap();
        assert_eq!(revisited, progress);
        assert!(revisited.is_step_complete(4));
        assert!(!revisited.is_step_complete(5));
    }

    #[test]
    fn test_rounding_of_percentage() {
        // 1 of 8 = 12.5% rounds half away from zero
        assert_eq!(percent_complete(1, 8), 13);
        assert_eq!(percent_complete(3, 8), 38);
        assert_eq!(percent_complete(0, 0), 0);
    }

    #[test]
    fn test_out_of_range_step() {
        let module = find_module(2).unwrap();
        let result = complete_step(module, &ModuleProgress::default(), 4);
        assert!(matches!(result, Err(AppError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_record_step_completion_persists() {
        let store = InMemoryProgressStore::new();
        let module = find_module(1).unwrap();

        record_step_completion(&store, "user-a", module, 0).await.unwrap();
        let second = record_step_completion(&store, "user-a", module, 1).await.unwrap();
        assert_eq!(second.completed_steps, 2);
        assert_eq!(second.progress_percent, 25);

        let loaded = store.load("user-a", 1).await.unwrap().unwrap();
        assert_eq!(loaded, second);

        // other users and modules are untouched
        assert!(store.load("user-b", 1).await.unwrap().is_none());
        assert!(store.load("user-a", 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_step_leaves_store_untouched() {
        let store = InMemoryProgressStore::new();
        let module = find_module(2).unwrap();

        record_step_completion(&store, "user-a", module, 1).await.unwrap();
        let result = record_step_completion(&store, "user-a", module, 9).await;
        assert!(matches!(result, Err(AppError::InvalidParameter(_))));

        let loaded = store.load("user-a", 2).await.unwrap().unwrap();
        assert_eq!(loaded.current_step, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_completions_keep_furthest_step() {
        let store = std::sync::Arc::new(InMemoryProgressStore::new());
        let module = find_module(1).unwrap();

        let mut handles = Vec::new();
        for step_index in 0..module.total_steps() {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                record_step_completion(&*store, "user-a", module, step_index).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let loaded = store.load("user-a", 1).await.unwrap().unwrap();
        assert_eq!(loaded.current_step, 8);
        assert_eq!(loaded.progress_percent, 100);
    }

    #[tokio::test]
    async fn test_interleaved_completions_do_not_move_backwards() {
        let store = InMemoryProgressStore::new();
        let module = find_module(1).unwrap();

        let (early, late) = tokio::join!(
            record_step_completion(&store, "user-a", module, 2),
            record_step_completion(&store, "user-a", module, 5),
        );
        early.unwrap();
        late.unwrap();

        let loaded = store.load("user-a", 1).await.unwrap().unwrap();
        assert_eq!(loaded.current_step, 6);
    }
}
