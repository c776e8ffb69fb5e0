use std::collections::BTreeMap;

use uuid::Uuid;

/// Emoji → reacting users. Invariant: a key present in the map always has a
/// non-empty user set; removing the last reactor deletes the key.
pub type ReactionMap = BTreeMap<String, Vec<Uuid>>;

/// Adds the user's reaction, or removes it if already present. A user reacts
/// at most once per emoji but may use several distinct emojis.
pub fn toggle(reactions: &mut ReactionMap, emoji: &str, user_id: Uuid) {
    match reactions.get_mut(emoji) {
        Some(users) => {
            if let Some(pos) = users.iter().position(|id| *id == user_id) {
                users.remove(pos);
                if users.is_empty() {
                    reactions.remove(emoji);
                }
            } else {
                users.push(user_id);
            }
        }
        None => {
            reactions.insert(emoji.to_string(), vec![user_id]);
        }
    }
}

/// Reaction count for one emoji, or across all emojis when `emoji` is `None`.
pub fn count(reactions: &ReactionMap, emoji: Option<&str>) -> usize {
    match emoji {
        Some(emoji) => reactions.get(emoji).map_or(0, Vec::len),
        None => reactions.values().map(Vec::len).sum(),
    }
}

pub fn has_reacted(reactions: &ReactionMap, user_id: Uuid, emoji: Option<&str>) -> bool {
    match emoji {
        Some(emoji) => reactions
            .get(emoji)
            .is_some_and(|users| users.contains(&user_id)),
        None => reactions.values().any(|users| users.contains(&user_id)),
    }
}
