//! Dependency graph traversal
//!
//! Both functions ignore dependency names that do not match any step in
//! the slice; referential integrity is reported separately by validation.

use crate::core::step::Step;
use std::collections::{HashMap, HashSet};

/// Topological order over `steps`
///
/// Ties are broken by insertion order so the result is deterministic:
/// among the steps whose dependencies are all placed, the earliest
/// declared one goes next. `Err` carries the ordered dependency cycle
/// that made ordering impossible.
pub fn topological_order(steps: &[Step]) -> Result<Vec<&str>, Vec<String>> {
    let known: HashSet<&str> = steps.iter().map(|s| s.name.as_str()).collect();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut remaining: Vec<usize> = (0..steps.len()).collect();
    let mut order = Vec::with_capacity(steps.len());

    while !remaining.is_empty() {
        let next = remaining.iter().position(|&i| {
            steps[i]
                .depends
                .iter()
                .all(|dep| placed.contains(dep.as_str()) || !known.contains(dep.as_str()))
        });

        match next {
            Some(pos) => {
                let i = remaining.remove(pos);
                placed.insert(steps[i].name.as_str());
                order.push(steps[i].name.as_str());
            }
            None => return Err(find_cycle(steps).unwrap_or_default()),
        }
    }

    Ok(order)
}

/// Find a dependency cycle, returned in traversal order
pub fn find_cycle(steps: &[Step]) -> Option<Vec<String>> {
    let by_name: HashMap<&str, &Step> =
        steps.iter().map(|s| (s.name.as_str(), s)).collect();
    let mut done: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();

    for step in steps {
        if let Some(cycle) = visit(step.name.as_str(), &by_name, &mut done, &mut path) {
            return Some(cycle);
        }
    }

    None
}

fn visit<'a>(
    name: &'a str,
    by_name: &HashMap<&'a str, &'a Step>,
    done: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    if done.contains(name) {
        return None;
    }
    if let Some(start) = path.iter().position(|&n| n == name) {
        return Some(path[start..].iter().map(|n| n.to_string()).collect());
    }

    let step = by_name.get(name)?;

    path.push(name);
    for dep in &step.depends {
        if let Some(cycle) = visit(dep.as_str(), by_name, done, path) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(name);

    None
}
