//! Public goal board route.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::cache::CacheKey;
use crate::db::GoalRepository;
use crate::error::AppError;
use crate::models::Goal;
use crate::state::AppState;

/// All goals, grouped by category.
///
/// The board shows every goal regardless of progress; categories sort
/// alphabetically and goals keep their newest-first order within each.
///
/// GET /api/goals
#[instrument(skip(state))]
pub async fn board(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let value = state
        .cache()
        .fetch(CacheKey::GoalBoard, async {
            let goals = GoalRepository::new(state.pool()).list_all().await?;
            Ok(json!({ "success": true, "categories": group_by_category(goals) }))
        })
        .await?;
    Ok(Json(value))
}

fn group_by_category(goals: Vec<Goal>) -> BTreeMap<String, Vec<Goal>> {
    let mut categories: BTreeMap<String, Vec<Goal>> = BTreeMap::new();
    for goal in goals {
        categories.entry(goal.category.clone()).or_default().push(goal);
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{GoalId, Progress};
    use chrono::Utc;

    fn goal(id: i32, category: &str) -> Goal {
        Goal {
            id: GoalId::new(id),
            title: format!("goal {id}"),
            progress: Progress::ZERO,
            category: category.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_grouping_preserves_order_within_category() {
        let grouped = group_by_category(vec![
            goal(3, "learning"),
            goal(2, "health"),
            goal(1, "learning"),
        ]);

        let learning: Vec<i32> = grouped["learning"].iter().map(|g| g.id.as_i32()).collect();
        assert_eq!(learning, vec![3, 1]);
        assert_eq!(grouped["health"].len(), 1);
        // BTreeMap keys come out sorted.
        let keys: Vec<&String> = grouped.keys().collect();
        assert_eq!(keys, vec!["health", "learning"]);
    }
}
