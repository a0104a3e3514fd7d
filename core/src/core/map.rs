//! Ordered address-range routing shared by the memory map and the IO map.
//!
//! A map is a list of devices, each claiming a closed range of addresses.
//! Lookups walk the list in insertion order and stop at the first mapping
//! whose range contains the address, so an earlier mapping overrides any
//! later one it overlaps.

/// One device claiming the closed address range `start..=end`.
pub struct Mapping<D: ?Sized, A> {
    device: Box<D>,
    start: A,
    end: A,
}

impl<D: ?Sized, A: Copy + PartialOrd> Mapping<D, A> {
    pub fn new(device: Box<D>, start: A, end: A) -> Self {
        Self { device, start, end }
    }

    pub fn start(&self) -> A {
        self.start
    }

    pub fn end(&self) -> A {
        self.end
    }

    /// Closed-interval containment: both `start` and `end` are inside.
    pub fn is_hit(&self, address: A) -> bool {
        self.start <= address && address <= self.end
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

/// Ordered list of [`Mapping`]s. Built once, then only dispatched through.
pub struct AddressMap<D: ?Sized, A> {
    mappings: Vec<Mapping<D, A>>,
}

impl<D: ?Sized, A> Default for AddressMap<D, A> {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
        }
    }
}

impl<D: ?Sized, A: Copy + PartialOrd> AddressMap<D, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapping. Mappings added earlier win on overlap.
    pub fn push(&mut self, device: Box<D>, start: A, end: A) {
        self.mappings.push(Mapping::new(device, start, end));
    }

    pub fn first_hit(&self, address: A) -> Option<&Mapping<D, A>> {
        self.mappings.iter().find(|m| m.is_hit(address))
    }

    pub fn first_hit_mut(&mut self, address: A) -> Option<&mut Mapping<D, A>> {
        self.mappings.iter_mut().find(|m| m.is_hit(address))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping<D, A>> {
        self.mappings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> AddressMap<str, u16> {
        let mut map = AddressMap::new();
        map.push("low".into(), 0x0000, 0x3FFF);
        map.push("high".into(), 0x4000, 0xFFFF);
        map
    }

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let map = names();
        assert_eq!(map.first_hit(0x0000).map(Mapping::device), Some("low"));
        assert_eq!(map.first_hit(0x3FFF).map(Mapping::device), Some("low"));
        assert_eq!(map.first_hit(0x4000).map(Mapping::device), Some("high"));
        assert_eq!(map.first_hit(0xFFFF).map(Mapping::device), Some("high"));
    }

    #[test]
    fn first_mapping_wins_on_overlap() {
        let mut map: AddressMap<str, u16> = AddressMap::new();
        map.push("overlay".into(), 0x1000, 0x1FFF);
        map.push("base".into(), 0x0000, 0xFFFF);
        assert_eq!(map.first_hit(0x1800).map(Mapping::device), Some("overlay"));
        assert_eq!(map.first_hit(0x2000).map(Mapping::device), Some("base"));
    }

    #[test]
    fn gap_between_mappings_is_unmapped() {
        let mut map: AddressMap<str, u8> = AddressMap::new();
        map.push("a".into(), 0x10, 0x1F);
        map.push("b".into(), 0x30, 0x3F);
        assert!(map.first_hit(0x20).is_none());
        assert!(map.first_hit(0x0F).is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn start_after_end_never_hits() {
        let mut map: AddressMap<str, u8> = AddressMap::new();
        map.push("inverted".into(), 0x80, 0x10);
        assert!(map.first_hit(0x00).is_none());
        assert!(map.first_hit(0x50).is_none());
        assert!(map.first_hit(0xFF).is_none());
    }
}
