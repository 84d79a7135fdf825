use crate::link::WhatsAppLink;

pub const DEFAULT_CAPACITY: usize = 5;

/// Recently generated links, newest first, unique, never longer than its
/// capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryList {
    links: Vec<WhatsAppLink>,
    capacity: usize,
}

impl HistoryList {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            links: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Builds a list from links in newest-first order. Later duplicates are
    /// dropped and the tail beyond capacity is cut.
    pub fn from_links<I>(links: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = WhatsAppLink>,
    {
        let mut list = Self::new(capacity);
        for link in links {
            if list.links.len() == list.capacity {
                break;
            }
            if !list.links.contains(&link) {
                list.links.push(link);
            }
        }
        list
    }

    /// Inserts at the front and returns the evicted oldest link when the
    /// list was full. Does not check for duplicates.
    pub fn push_front(&mut self, link: WhatsAppLink) -> Option<WhatsAppLink> {
        self.links.insert(0, link);
        if self.links.len() > self.capacity {
            self.links.pop()
        } else {
            None
        }
    }

    /// 1-based position of `link`, as shown to the user.
    pub fn position(&self, link: &WhatsAppLink) -> Option<usize> {
        self.links.iter().position(|l| l == link).map(|i| i + 1)
    }

    pub fn contains(&self, link: &WhatsAppLink) -> bool {
        self.links.contains(link)
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn links(&self) -> &[WhatsAppLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryList {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(n: u32) -> WhatsAppLink {
        WhatsAppLink::parse(&format!("https://wa.me/9665{n:08}")).unwrap()
    }

    #[test]
    fn push_front_puts_newest_first() {
        let mut list = HistoryList::default();
        list.push_front(link(1));
        list.push_front(link(2));
        assert_eq!(list.links(), &[link(2), link(1)]);
    }

    #[test]
    fn push_front_on_full_list_evicts_oldest() {
        let mut list = HistoryList::default();
        for n in 1..=5 {
            assert_eq!(list.push_front(link(n)), None);
        }

        let evicted = list.push_front(link(6));

        assert_eq!(evicted, Some(link(1)));
        assert_eq!(list.len(), 5);
        assert_eq!(list.links()[0], link(6));
        assert!(!list.contains(&link(1)));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut list = HistoryList::new(3);
        for n in 0..20 {
            list.push_front(link(n));
            assert!(list.len() <= 3);
        }
        assert_eq!(list.links(), &[link(19), link(18), link(17)]);
    }

    #[test]
    fn position_is_one_based() {
        let mut list = HistoryList::default();
        list.push_front(link(1));
        list.push_front(link(2));
        assert_eq!(list.position(&link(2)), Some(1));
        assert_eq!(list.position(&link(1)), Some(2));
        assert_eq!(list.position(&link(3)), None);
    }

    #[test]
    fn from_links_dedups_and_caps() {
        let list = HistoryList::from_links(
            vec![link(1), link(2), link(1), link(3), link(4), link(5), link(6)],
            5,
        );
        assert_eq!(list.links(), &[link(1), link(2), link(3), link(4), link(5)]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut list = HistoryList::new(0);
        list.push_front(link(1));
        list.push_front(link(2));
        assert_eq!(list.links(), &[link(2)]);
    }

    #[test]
    fn clear_empties_list() {
        let mut list = HistoryList::from_links(vec![link(1), link(2)], 5);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 5);
    }
}
