//! Recency List Module
//!
//! Arena-backed doubly linked list used for LRU ordering.

// == Handle ==
/// Stable index of a node inside a [`RecencyList`].
///
/// A handle stays valid until its node is removed; slots are recycled
/// afterwards, so a stale handle must not be reused.
pub type Handle = usize;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

// == Recency List ==
/// Tracks access order with O(1) push, move-to-front, remove and pop.
///
/// Nodes live in a slot vector and link to each other by index:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value as the most recently used node.
    pub fn push_front(&mut self, value: T) -> Handle {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.attach_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || !self.contains(handle) {
            return;
        }
        self.detach(handle);
        self.attach_front(handle);
    }

    // == Remove ==
    /// Unlinks a node and returns its value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        self.detach(handle);
        let node = self.slots[handle].take()?;
        self.free.push(handle);
        self.len -= 1;
        Some(node.value)
    }

    // == Pop Back ==
    /// Returns and removes the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.value)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        matches!(self.slots.get(handle), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates values from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots.get(cursor?)?.as_ref()?;
            cursor = node.next;
            Some(&node.value)
        })
    }

    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(node) = self.slots[handle].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.slots[h].as_mut()) {
            Some(head) => head.prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn detach(&mut self, handle: Handle) {
        let (prev, next) = match self.slots[handle].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match prev.and_then(|h| self.slots[h].as_mut()) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|h| self.slots[h].as_mut()) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        if let Some(node) = self.slots[handle].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    fn back(list: &RecencyList<&'static str>) -> Option<&'static str> {
        list.iter().last().copied()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<&str> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(back(&list).is_none());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.len(), 3);
        assert_eq!(collect(&list), vec!["key3", "key2", "key1"]);
        assert_eq!(back(&list), Some("key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        list.move_to_front(a);

        assert_eq!(collect(&list), vec!["a", "c", "b"]);
        assert_eq!(back(&list), Some("b"));
    }

    #[test]
    fn test_move_middle_and_tail() {
        let mut list = RecencyList::new();

        let a = list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        list.move_to_front(b);
        assert_eq!(collect(&list), vec!["b", "c", "a"]);

        list.move_to_front(a);
        assert_eq!(collect(&list), vec!["a", "b", "c"]);
        assert_eq!(back(&list), Some("c"));
    }

    #[test]
    fn test_pop_back_in_lru_order() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.pop_back(), Some("key1"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back(), Some("key2"));
        assert_eq!(list.pop_back(), Some("key3"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        list.push_front("key1");
        let key2 = list.push_front("key2");
        list.push_front("key3");

        assert_eq!(list.remove(key2), Some("key2"));
        assert_eq!(list.len(), 2);
        assert!(!list.contains(key2));
        assert_eq!(collect(&list), vec!["key3", "key1"]);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut list = RecencyList::new();
        let handle = list.push_front("only");

        assert_eq!(list.remove(handle), Some("only"));
        assert_eq!(list.remove(handle), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = RecencyList::new();

        let first = list.push_front("a");
        list.remove(first);
        let second = list.push_front("b");

        assert_eq!(first, second);
        assert_eq!(list.get(second), Some(&"b"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = RecencyList::new();
        let handle = list.push_front(String::from("old"));

        if let Some(value) = list.get_mut(handle) {
            value.push_str("-new");
        }

        assert_eq!(list.get(handle).map(String::as_str), Some("old-new"));
    }
}
