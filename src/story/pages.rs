use crate::node::ParseTree;

use indexmap::IndexMap;

#[derive(Clone, Debug, Default, PartialEq)]
/// Conditional trees of all forks in a story, by normalized fork name.
///
/// Forks are kept in the order they were added, which is the order they appear in
/// the story.
pub struct PageDictionary {
    forks: IndexMap<String, ParseTree>,
}

impl PageDictionary {
    pub fn new() -> Self {
        PageDictionary::default()
    }

    /// Add a fork. If the name is already used the fork is not added and `false`
    /// is returned.
    pub fn insert(&mut self, name: &str, tree: ParseTree) -> bool {
        if self.forks.contains_key(name) {
            return false;
        }

        self.forks.insert(name.to_string(), tree);

        true
    }

    pub fn get(&self, name: &str) -> Option<&ParseTree> {
        self.forks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forks.contains_key(name)
    }

    /// Name of the first fork in the story.
    pub fn first(&self) -> Option<&str> {
        self.forks.keys().next().map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParseTree)> {
        self.forks.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MetaData, node::NodeId};

    fn tree() -> ParseTree {
        ParseTree::new(&MetaData::default())
    }

    #[test]
    fn forks_keep_their_insertion_order() {
        let mut pages = PageDictionary::new();

        pages.insert("zebra", tree());
        pages.insert("apple", tree());
        pages.insert("mango", tree());

        assert_eq!(pages.first(), Some("zebra"));
        assert_eq!(pages.names().collect::<Vec<_>>(), vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn first_fork_with_a_name_is_kept() {
        let mut pages = PageDictionary::new();

        let mut first = tree();

        if let Some(node) = first.get_mut(NodeId::ROOT) {
            node.text = "first".to_string();
        }

        assert!(pages.insert("start", first));
        assert!(!pages.insert("start", tree()));

        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get("start").unwrap().root().text, "first");
    }

    #[test]
    fn missing_forks_are_not_found() {
        let pages = PageDictionary::new();

        assert!(pages.is_empty());
        assert!(!pages.contains("start"));
        assert!(pages.get("start").is_none());
        assert_eq!(pages.first(), None);
    }
}
