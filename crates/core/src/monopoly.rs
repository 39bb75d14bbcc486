//! Color-group monopoly detection.

use tracing::debug;

use crate::{catalog::Catalog, registry::Registry};

/// Rebuild every player's monopoly set from current ownership.
///
/// A color counts when every member of its group has the same owner.
/// Mortgages do not remove a color from the set; callers check them through
/// [`Registry::has_monopoly`].
pub fn recompute(catalog: &Catalog, registry: &mut Registry) {
    for player in registry.iter_mut() {
        player.monopolies.clear();
    }

    for color in catalog.colors() {
        let Some(owner) = sole_owner(catalog, color) else {
            continue;
        };
        if let Ok(index) = registry.index_of(owner) {
            registry.get_mut(index).monopolies.push(color.to_string());
            debug!(player = owner, color, "Monopoly held");
        }
    }
}

fn sole_owner<'a>(catalog: &'a Catalog, color: &'a str) -> Option<&'a str> {
    let mut members = catalog.group_members(color);
    let owner = members.next()?.owner.as_deref()?;
    members
        .all(|property| property.owner.as_deref() == Some(owner))
        .then_some(owner)
}
