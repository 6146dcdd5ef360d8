//! Variant image diffing.
//!
//! Images match by url; a changed label or dimension is handled as a
//! remove-then-re-add of the same url. Every removal precedes every
//! addition (hard ordering requirement), and surviving order differences
//! are reconciled with move-to-position actions last.

use std::collections::HashMap;
use storesync_types::Image;

/// A kind-neutral image mutation, scoped to one variant by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageDiff {
    Remove(String),
    Add(Image, usize),
    Move(String, usize),
}

/// Diffs two image lists of one variant.
pub fn diff_images(old: &[Image], new: &[Image]) -> Vec<ImageDiff> {
    let new_by_url: HashMap<&str, &Image> =
        new.iter().map(|image| (image.url.as_str(), image)).collect();
    let old_by_url: HashMap<&str, &Image> =
        old.iter().map(|image| (image.url.as_str(), image)).collect();

    let survives = |image: &Image| {
        new_by_url
            .get(image.url.as_str())
            .map_or(false, |new_image| *new_image == image)
    };

    let mut removals = Vec::new();
    for image in old {
        match new_by_url.get(image.url.as_str()) {
            None => removals.push(ImageDiff::Remove(image.url.clone())),
            // Changed content: drop the stale copy, re-added below.
            Some(new_image) if *new_image != image => {
                removals.push(ImageDiff::Remove(image.url.clone()));
            }
            Some(_) => {}
        }
    }

    let mut additions = Vec::new();
    for (position, image) in new.iter().enumerate() {
        let unchanged = old_by_url
            .get(image.url.as_str())
            .map_or(false, |old_image| *old_image == image);
        if !unchanged {
            additions.push(ImageDiff::Add(image.clone(), position));
        }
    }

    // Simulate the list after removals and positional adds, then move
    // whatever still sits at the wrong index.
    let mut simulated: Vec<&str> = old
        .iter()
        .filter(|image| survives(image))
        .map(|image| image.url.as_str())
        .collect();
    for action in &additions {
        if let ImageDiff::Add(image, position) = action {
            let at = (*position).min(simulated.len());
            simulated.insert(at, image.url.as_str());
        }
    }
    let mut moves = Vec::new();
    for (position, image) in new.iter().enumerate() {
        if simulated.get(position).copied() != Some(image.url.as_str()) {
            moves.push(ImageDiff::Move(image.url.clone(), position));
        }
    }

    let mut actions = removals;
    actions.extend(additions);
    actions.extend(moves);
    actions
}
