use crate::error::AppError;

/// Smallest point set the service is asked to generate
pub const MIN_POINT_COUNT: i64 = 10;

/// Smallest side of the space, in units
pub const MIN_SPACE_SIDE: i64 = 50;

/// Bounds of the default `k_max` suggestion for the elbow analysis
pub const K_MAX_FLOOR: usize = 2;
pub const K_MAX_CEILING: usize = 30;

/// Validated inputs of a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateParams {
    pub count: u32,
    pub width: u32,
    pub height: u32,
}

impl GenerateParams {
    pub fn new(count: i64, width: i64, height: i64) -> Result<Self, AppError> {
        if count < MIN_POINT_COUNT {
            return Err(AppError::validation(format!(
                "enter a valid number of houses (minimum {})",
                MIN_POINT_COUNT
            )));
        }
        if width < MIN_SPACE_SIDE || height < MIN_SPACE_SIDE {
            return Err(AppError::validation(format!(
                "enter valid space dimensions (minimum {}x{})",
                MIN_SPACE_SIDE, MIN_SPACE_SIDE
            )));
        }

        let to_u32 = |field: &str, v: i64| {
            u32::try_from(v).map_err(|_| AppError::validation(format!("{} is too large", field)))
        };

        Ok(Self {
            count: to_u32("house count", count)?,
            width: to_u32("width", width)?,
            height: to_u32("height", height)?,
        })
    }

    /// The service works in a square space sized to the larger side
    pub fn space_size(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Parse integer form text, naming the field on failure
pub fn parse_integer(field: &str, text: &str) -> Result<i64, AppError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("{} must be an integer, got {:?}", field, text)))
}

pub fn validate_k(k: i64) -> Result<usize, AppError> {
    if k < 1 {
        return Err(AppError::validation("enter a valid number of hospitals"));
    }
    usize::try_from(k).map_err(|_| AppError::validation("number of hospitals is too large"))
}

/// Upper k bound sent to the elbow/silhouette analysis
///
/// A user k above 1 wins over the `sqrt(n) * 2` suggestion; either way the
/// bound stays below the point count.
pub fn suggested_k_max(point_count: usize, k_input: i64) -> usize {
    let suggested = (((point_count as f64).sqrt() * 2.0).floor() as usize)
        .clamp(K_MAX_FLOOR, K_MAX_CEILING);
    let cap = point_count.saturating_sub(1);

    if k_input > 1 {
        (k_input as usize).min(cap)
    } else {
        suggested.min(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_params_accepts_minimums() {
        let params = GenerateParams::new(10, 50, 50).unwrap();
        assert_eq!(params.count, 10);
        assert_eq!(params.space_size(), 50);
    }

    #[test]
    fn test_generate_params_space_is_larger_side() {
        let params = GenerateParams::new(20, 120, 80).unwrap();
        assert_eq!(params.space_size(), 120);
    }

    #[test]
    fn test_generate_params_rejects_out_of_range() {
        let cases = vec![(9, 100, 100), (0, 100, 100), (10, 49, 100), (10, 100, 49), (-5, -5, -5)];
        for (count, width, height) in cases {
            let err = GenerateParams::new(count, width, height).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(_)),
                "({}, {}, {}) should fail validation",
                count,
                width,
                height
            );
        }
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("k", " 12 ").unwrap(), 12);
        assert!(matches!(parse_integer("k", "twelve"), Err(AppError::Validation(_))));
        assert!(matches!(parse_integer("k", "1.5"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_k() {
        assert_eq!(validate_k(1).unwrap(), 1);
        assert!(validate_k(0).is_err());
        assert!(validate_k(-3).is_err());
    }

    #[test]
    fn test_k_max_default_suggestion() {
        // floor(sqrt(20) * 2) = 8
        assert_eq!(suggested_k_max(20, 0), 8);
        // floor(sqrt(400) * 2) = 40, clamped to 30
        assert_eq!(suggested_k_max(400, 0), 30);
        // k input of 1 does not count as a user choice
        assert_eq!(suggested_k_max(20, 1), 8);
    }

    #[test]
    fn test_k_max_uses_user_k() {
        assert_eq!(suggested_k_max(20, 5), 5);
        assert_eq!(suggested_k_max(20, 25), 19);
    }

    #[test]
    fn test_k_max_capped_below_point_count() {
        // suggestion floor of 2 still capped at n - 1
        assert_eq!(suggested_k_max(2, 0), 1);
        assert_eq!(suggested_k_max(10, 0), 6);
    }
}
