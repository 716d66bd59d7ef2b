//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Key attribute names, hash key first.
    pub key_names: Vec<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with other keys. Keys cannot be altered in place.
    KeyMismatch {
        table_name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            config: desired.clone(),
        },
        Some(state) => {
            let expected = desired.key_names();
            if state.key_names == expected {
                DeployPlan::NoChanges {
                    table_name: desired.table_name.clone(),
                }
            } else {
                DeployPlan::KeyMismatch {
                    table_name: desired.table_name.clone(),
                    expected,
                    found: state.key_names.clone(),
                }
            }
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!("  Sort key: {} (S)", sk.name));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            found,
        } => vec![
            format!("~ Table '{}' has keys [{}]", table_name, found.join(", ")),
            format!(
                "  expected [{}]; destroy and redeploy to fix",
                expected.join(", ")
            ),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::movie_table_config;

    fn state(keys: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            key_names: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_plan_create_when_missing() {
        let desired = movie_table_config();
        let plan = calculate_deploy_plan(None, &desired);

        assert_eq!(plan, DeployPlan::CreateTable { config: desired });
        assert_eq!(
            format_deploy_plan(&plan),
            vec![
                "+ Create table: dynamodb",
                "  Partition key: PK (S)",
                "  Sort key: SK (S)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }

    #[test]
    fn test_plan_no_changes() {
        let plan = calculate_deploy_plan(Some(&state(&["PK", "SK"])), &movie_table_config());
        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "dynamodb".to_string()
            }
        );
    }

    #[test]
    fn test_plan_key_mismatch() {
        let plan = calculate_deploy_plan(Some(&state(&["id"])), &movie_table_config());
        assert!(matches!(plan, DeployPlan::KeyMismatch { ref found, .. } if found == &["id"]));
        assert_eq!(format_deploy_plan(&plan)[0], "~ Table 'dynamodb' has keys [id]");
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(None, "movies"),
            DestroyPlan::AlreadyGone {
                table_name: "movies".to_string()
            }
        );
        let plan = calculate_destroy_plan(Some(&state(&["PK", "SK"])), "movies");
        assert_eq!(
            format_destroy_plan(&plan),
            vec!["- Delete table: movies (ALL DATA WILL BE LOST)"]
        );
    }
}
