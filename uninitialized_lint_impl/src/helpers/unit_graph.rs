// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::provider::SyntaxProvider;
use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    InProgress,
    Done(usize),
}

///
/// Group units into waves: a unit's wave is one past the deepest wave among
/// the units it imports. Imports of units outside `units` are ignored. Each
/// wave lists indices into `units`, sorted by unit path.
///
pub fn dependency_waves<P: SyntaxProvider>(units: &[P]) -> Result<Vec<Vec<usize>>> {
    let mut by_path: HashMap<&str, usize> = HashMap::new();
    for (index, unit) in units.iter().enumerate() {
        if by_path.insert(unit.unit_path(), index).is_some() {
            bail!("Unit {} appears more than once", unit.unit_path());
        }
    }

    let imports: Vec<Vec<usize>> = units
        .iter()
        .map(|unit| {
            unit.dependencies()
                .iter()
                .filter_map(|path| by_path.get(path.as_str()).copied())
                .collect()
        })
        .collect();

    let mut state: Vec<Option<Visit>> = vec![None; units.len()];
    let mut waves: Vec<Vec<usize>> = Vec::new();
    for index in 0..units.len() {
        let wave = visit(index, &imports, &mut state, &mut Vec::new())
            .map_err(|cycle| describe_cycle(units, &cycle))?;
        if waves.len() <= wave {
            waves.resize_with(wave + 1, Vec::new);
        }
        waves[wave].push(index);
    }

    for wave in &mut waves {
        wave.sort_by(|a, b| units[*a].unit_path().cmp(units[*b].unit_path()));
    }
    Ok(waves)
}

// Depth-first wave assignment; on a cycle, returns the units on it
fn visit(
    index: usize,
    imports: &[Vec<usize>],
    state: &mut [Option<Visit>],
    stack: &mut Vec<usize>,
) -> std::result::Result<usize, Vec<usize>> {
    match state[index] {
        Some(Visit::Done(wave)) => return Ok(wave),
        Some(Visit::InProgress) => {
            let start = stack.iter().position(|&i| i == index).unwrap_or(0);
            let mut cycle = stack[start..].to_vec();
            cycle.push(index);
            return Err(cycle);
        }
        None => {}
    }

    state[index] = Some(Visit::InProgress);
    stack.push(index);

    let mut wave = 0;
    for &dependency in &imports[index] {
        wave = wave.max(visit(dependency, imports, state, stack)? + 1);
    }

    stack.pop();
    state[index] = Some(Visit::Done(wave));
    Ok(wave)
}

fn describe_cycle<P: SyntaxProvider>(units: &[P], cycle: &[usize]) -> anyhow::Error {
    let path: Vec<&str> = cycle.iter().map(|&i| units[i].unit_path()).collect();
    anyhow!("Import cycle between units: {}", path.join(" -> "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uninitialized_common::{ImportSpec, SourceFile, SourceUnit};

    fn unit(path: &str, imports: &[&str]) -> SourceUnit {
        let mut file = SourceFile::new("main.go");
        file.imports = imports
            .iter()
            .map(|import| ImportSpec {
                path: import.to_string(),
                alias: None,
            })
            .collect();
        let mut unit = SourceUnit::new(path);
        unit.files.push(file);
        unit
    }

    fn paths(units: &[SourceUnit], waves: &[Vec<usize>]) -> Vec<Vec<String>> {
        waves
            .iter()
            .map(|wave| wave.iter().map(|&i| units[i].path.clone()).collect())
            .collect()
    }

    #[test]
    fn test_waves_follow_imports() {
        let units = vec![
            unit("app", &["lib/b", "lib/a", "fmt"]),
            unit("lib/b", &["lib/a"]),
            unit("lib/a", &["strings"]),
            unit("tool", &["lib/a"]),
        ];
        let waves = dependency_waves(&units).unwrap();
        assert_eq!(
            paths(&units, &waves),
            vec![
                vec!["lib/a".to_string()],
                vec!["lib/b".to_string(), "tool".to_string()],
                vec!["app".to_string()],
            ]
        );
    }

    #[test]
    fn test_independent_units_share_a_wave() {
        let units = vec![unit("b", &[]), unit("a", &[])];
        let waves = dependency_waves(&units).unwrap();
        assert_eq!(paths(&units, &waves), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let units = vec![unit("a", &["b"]), unit("b", &["c"]), unit("c", &["a"])];
        let err = dependency_waves(&units).unwrap_err();
        assert_eq!(err.to_string(), "Import cycle between units: a -> b -> c -> a");
    }

    #[test]
    fn test_duplicate_unit_is_an_error() {
        let units = vec![unit("a", &[]), unit("a", &[])];
        assert!(dependency_waves(&units).is_err());
    }

    #[test]
    fn test_no_units() {
        let units: Vec<SourceUnit> = vec![];
        assert!(dependency_waves(&units).unwrap().is_empty());
    }
}
