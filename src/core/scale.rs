use serde::{Deserialize, Serialize};

/// Linear price → vertical pixel mapping over a plot band.
///
/// Higher prices map closer to `top`. A degenerate domain never divides by
/// zero: the span is widened to [`MIN_PRICE_SPAN`] around its midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceMapper {
    min_price: f64,
    max_price: f64,
    top: f64,
    bottom: f64,
}

pub const MIN_PRICE_SPAN: f64 = 1e-6;

impl PriceMapper {
    #[must_use]
    pub fn new(min_price: f64, max_price: f64, top: f64, bottom: f64) -> Self {
        let (mut min_price, mut max_price) = if min_price <= max_price {
            (min_price, max_price)
        } else {
            (max_price, min_price)
        };
        if !(max_price - min_price).is_finite() || max_price - min_price < MIN_PRICE_SPAN {
            let mid = if (min_price + max_price).is_finite() {
                (min_price + max_price) / 2.0
            } else {
                0.0
            };
            min_price = mid - MIN_PRICE_SPAN / 2.0;
            max_price = mid + MIN_PRICE_SPAN / 2.0;
        }
        Self {
            min_price,
            max_price,
            top,
            bottom,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min_price, self.max_price)
    }

    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        self.top
            + (self.max_price - price) / (self.max_price - self.min_price) * (self.bottom - self.top)
    }

    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        let height = self.bottom - self.top;
        if height == 0.0 {
            return self.max_price;
        }
        self.max_price - (y - self.top) / height * (self.max_price - self.min_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_extremes_to_band_edges() {
        let mapper = PriceMapper::new(10.0, 20.0, 50.0, 450.0);
        assert_eq!(mapper.price_to_y(20.0), 50.0);
        assert_eq!(mapper.price_to_y(10.0), 450.0);
        assert!((mapper.y_to_price(250.0) - 15.0).abs() <= 1e-9);
    }

    #[test]
    fn degenerate_domain_stays_finite() {
        let mapper = PriceMapper::new(5.0, 5.0, 0.0, 100.0);
        let y = mapper.price_to_y(5.0);
        assert!(y.is_finite());
        assert!((y - 50.0).abs() <= 1e-6);
    }
}
