use uuid::Uuid;

/// Produces fresh, globally unique ids
pub trait IdGenerator {
    fn generate(&mut self) -> String;
}

/// 24-hex ids in the shape of the base data, drawn from uuid v4
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(24);
        id
    }
}

/// Predictable ids (`<prefix>0`, `<prefix>1`, …) for reproducible runs
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_24_hex() {
        let mut ids = UuidIds;
        let a = ids.generate();
        let b = ids.generate();
        assert_eq!(a.len(), 24);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("id");
        assert_eq!(ids.generate(), "id0");
        assert_eq!(ids.generate(), "id1");
    }
}
