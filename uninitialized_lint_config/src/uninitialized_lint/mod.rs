// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

mod builder;
mod types;

pub use builder::{UninitializedConstraintBuilder, UninitializedLintBuilder, UninitializedLintExt};
pub use types::{DEFAULT_LINT_NAME, UninitializedLint};
