use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::contour::Color;

/// Parent index marking a top-level contour.
pub const NO_PARENT: i32 = -1;

fn parent_of(parents: &[i32], node: usize) -> VecVidResult<Option<usize>> {
    match parents[node] {
        NO_PARENT => Ok(None),
        raw if raw >= 0 && (raw as usize) < parents.len() => Ok(Some(raw as usize)),
        raw => Err(VecVidError::validation(format!(
            "contour {node} has parent index {raw}, outside -1..{}",
            parents.len()
        ))),
    }
}

/// Nesting depth (number of ancestors) for every contour of a parent-index hierarchy.
///
/// `parents[i]` is the index of the contour immediately enclosing contour `i`, or
/// [`NO_PARENT`]. A parent chain that revisits a contour is rejected.
pub fn derive_depths(parents: &[i32]) -> VecVidResult<Vec<usize>> {
    let n = parents.len();
    let mut depths: Vec<Option<usize>> = vec![None; n];
    let mut path = Vec::new();

    for start in 0..n {
        if depths[start].is_some() {
            continue;
        }
        path.clear();

        let mut node = start;
        // Depth of the first already-known ancestor, or `None` when the walk reached a root.
        let known = loop {
            if let Some(d) = depths[node] {
                break Some(d);
            }
            if path.len() == n {
                return Err(VecVidError::validation(format!(
                    "contour hierarchy has a cycle through contour {node}"
                )));
            }
            path.push(node);
            match parent_of(parents, node)? {
                Some(p) => node = p,
                None => break None,
            }
        };

        let base = known.map_or(0, |d| d + 1);
        let last = path.len() - 1;
        for (k, &idx) in path.iter().enumerate() {
            depths[idx] = Some(base + (last - k));
        }
    }

    Ok(depths.into_iter().map(|d| d.unwrap_or(0)).collect())
}

/// Contour colors by nesting parity: top-level white, children black, grandchildren white, ...
pub fn derive_colors(parents: &[i32]) -> VecVidResult<Vec<Color>> {
    Ok(derive_depths(parents)?
        .into_iter()
        .map(Color::from_depth)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/color.rs"]
mod tests;
