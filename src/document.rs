//! In-memory document mirror.
//!
//! Confirmed mutations are applied to the [`PatternProject`] with the same
//! identity rules the canvas index uses, so the mirror and the scene always
//! agree on which stitches exist.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use canvas::index::StitchKey;
use schema::{AddedPaletteItem, Pattern, PatternProject, Stitch, StitchBundle};

/// Insert a stitch. A stitch with the same identity is replaced and returned.
pub fn insert_stitch(pattern: &mut Pattern, stitch: Stitch) -> Option<Stitch> {
    match stitch {
        Stitch::Full(s) => upsert(&mut pattern.fullstitches, s).map(Stitch::Full),
        Stitch::Part(s) => upsert(&mut pattern.partstitches, s).map(Stitch::Part),
        Stitch::Line(s) => upsert(&mut pattern.lines, s).map(Stitch::Line),
        Stitch::Node(s) => upsert(&mut pattern.nodes, s).map(Stitch::Node),
    }
}

/// Remove the stitch with the given identity, returning what was stored.
pub fn remove_stitch(pattern: &mut Pattern, stitch: &Stitch) -> Option<Stitch> {
    let key = StitchKey::from(stitch);
    match stitch {
        Stitch::Full(_) => take(&mut pattern.fullstitches, key).map(Stitch::Full),
        Stitch::Part(_) => take(&mut pattern.partstitches, key).map(Stitch::Part),
        Stitch::Line(_) => take(&mut pattern.lines, key).map(Stitch::Line),
        Stitch::Node(_) => take(&mut pattern.nodes, key).map(Stitch::Node),
    }
}

pub fn insert_stitches(pattern: &mut Pattern, bundle: &StitchBundle) {
    for stitch in bundle.iter() {
        insert_stitch(pattern, stitch);
    }
}

/// Remove every stitch of a bundle. Returns how many were present.
pub fn remove_stitches(pattern: &mut Pattern, bundle: &StitchBundle) -> usize {
    bundle.iter().filter(|stitch| remove_stitch(pattern, stitch).is_some()).count()
}

/// Append a palette item with the symbols and formats it was confirmed with.
/// Returns its index.
pub fn push_palette_item(project: &mut PatternProject, added: AddedPaletteItem) -> usize {
    project.pattern.palette.push(added.palitem);
    project.display_settings.symbols.push(added.symbols);
    project.display_settings.formats.push(added.formats);
    project.pattern.palette.len() - 1
}

fn upsert<T: Copy>(items: &mut Vec<T>, item: T) -> Option<T>
where
    for<'a> StitchKey: From<&'a T>,
{
    let key = StitchKey::from(&item);
    match items.iter().position(|existing| StitchKey::from(existing) == key) {
        Some(at) => Some(std::mem::replace(&mut items[at], item)),
        None => {
            items.push(item);
            None
        }
    }
}

fn take<T>(items: &mut Vec<T>, key: StitchKey) -> Option<T>
where
    for<'a> StitchKey: From<&'a T>,
{
    let at = items.iter().position(|existing| StitchKey::from(existing) == key)?;
    Some(items.remove(at))
}
