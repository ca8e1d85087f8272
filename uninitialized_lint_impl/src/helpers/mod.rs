// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod check_runner;
pub mod rule_collection;
pub mod unit_graph;
