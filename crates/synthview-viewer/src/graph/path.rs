use synthview_core::PathId;

pub const DEFAULT_SEPARATOR: char = ':';

/// Splits hierarchical node ids like `-:2:1` into their segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCodec {
    pub separator: char,
}

impl Default for PathCodec {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl PathCodec {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Everything after the last separator; empty when there is none.
    pub fn last_segment<'a>(&self, id: &'a str) -> &'a str {
        match id.rfind(self.separator) {
            Some(pos) => &id[pos + self.separator.len_utf8()..],
            None => "",
        }
    }

    pub fn parent_id(&self, id: &str) -> PathId {
        match id.rfind(self.separator) {
            Some(pos) if pos > 0 => PathId(id[..pos].to_string()),
            _ => PathId::root(),
        }
    }

    /// Id of the `index`-th option under `parent`.
    pub fn child_id(&self, parent: &str, index: usize) -> PathId {
        PathId(format!("{parent}{}{index}", self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_takes_tail_after_final_separator() {
        let codec = PathCodec::default();
        assert_eq!(codec.last_segment("-:2:1"), "1");
        assert_eq!(codec.last_segment("-:12"), "12");
        assert_eq!(codec.last_segment("-"), "");
        assert_eq!(codec.last_segment("-:"), "");
    }

    #[test]
    fn parent_id_strips_one_segment() {
        let codec = PathCodec::default();
        assert_eq!(codec.parent_id("-:2:1"), PathId::from("-:2"));
        assert_eq!(codec.parent_id("-:2"), PathId::from("-"));
        assert_eq!(codec.parent_id("-"), PathId::root());
    }

    #[test]
    fn dash_separated_ids() {
        let codec = PathCodec::new('-');
        assert_eq!(codec.last_segment("-0-3"), "3");
        assert_eq!(codec.parent_id("-0-3"), PathId::from("-0"));
        // stripping the only segment would leave nothing
        assert_eq!(codec.parent_id("-0"), PathId::root());
    }

    #[test]
    fn child_addressing() {
        let codec = PathCodec::default();
        let child = codec.child_id("-:2", 4);
        assert_eq!(child, PathId::from("-:2:4"));
        assert_eq!(codec.parent_id(child.as_str()), PathId::from("-:2"));
        assert_eq!(codec.last_segment(child.as_str()), "4");
        assert_eq!(PathCodec::new('-').child_id("-", 0), PathId::from("--0"));
    }
}
