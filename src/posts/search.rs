use crate::model::Post;

/// Case-insensitive title search used by the home list.
///
/// An empty (or whitespace-only) query matches every post.
pub fn filter_by_title<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }
    posts
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}
