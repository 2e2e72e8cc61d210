use ulid::Ulid;

/// Who triggered an operation.
///
/// Built by the HTTP layer from the authenticated user and passed to every
/// command so ownership checks live next to the writes they guard.
#[derive(Clone, Debug)]
pub struct Metadata {
    pub id: String,
    pub trigger_by: Option<String>,
}

impl Metadata {
    pub fn new(trigger_by: impl Into<Option<String>>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            trigger_by: trigger_by.into(),
        }
    }

    pub fn by(trigger_by: impl Into<String>) -> Self {
        Self::new(Some(trigger_by.into()))
    }

    pub fn trigger_by(&self) -> crate::Result<String> {
        match self.trigger_by.to_owned() {
            Some(id) => Ok(id),
            _ => Err(crate::Error::Unauthorized),
        }
    }

    /// Fails with [`crate::Error::Forbidden`] unless the actor owns the resource.
    pub fn ensure_owner(&self, owner_id: &str) -> crate::Result<()> {
        if self.trigger_by()? != owner_id {
            return Err(crate::Error::Forbidden);
        }

        Ok(())
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_owner() {
        let metadata = Metadata::by("john");
        assert!(metadata.ensure_owner("john").is_ok());
        assert!(matches!(
            metadata.ensure_owner("albert"),
            Err(crate::Error::Forbidden)
        ));
        assert!(matches!(
            Metadata::default().ensure_owner("john"),
            Err(crate::Error::Unauthorized)
        ));
    }
}
