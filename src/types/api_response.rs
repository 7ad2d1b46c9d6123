/// A successful API payload with its provenance.
///
/// The full result of any client operation is `crate::Result<ApiResponse<T>>`;
/// exactly one of payload-or-error exists by construction, and `from_cache`
/// records whether the payload came from the response cache instead of the
/// network.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// The response payload.
    pub data: T,
    /// True when served from the cache without network I/O.
    pub from_cache: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload that came from the network.
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            from_cache: false,
        }
    }

    /// Wraps a payload served from the cache.
    pub fn cached(data: T) -> Self {
        Self {
            data,
            from_cache: true,
        }
    }

    /// Consumes the response, returning the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_is_recorded() {
        assert!(!ApiResponse::fresh(1u32).from_cache);
        assert!(ApiResponse::cached(1u32).from_cache);
        assert_eq!(ApiResponse::fresh("x").into_inner(), "x");
    }
}
