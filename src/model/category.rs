use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Competition division. The two divisions share the scoring formula but
/// differ in weights, altitude polynomial and default static score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "academic", alias = "ACADEMIC")]
    Academic,
    #[serde(alias = "clubs", alias = "CLUBS")]
    Clubs,
}

/// Sub-score weights. The altitude sub-score has no weight: it is the
/// category polynomial alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub payload: f64,
    pub circuit: f64,
    pub glide: f64,
    pub loading: f64,
}

/// Coefficients of `c4*A^4 + c3*A^3 + c2*A^2 + c1*A`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudePolynomial {
    pub c4: f64,
    pub c3: f64,
    pub c2: f64,
    pub c1: f64,
}

impl AltitudePolynomial {
    pub fn eval(&self, a: f64) -> f64 {
        self.c4 * a.powi(4) + self.c3 * a.powi(3) + self.c2 * a.powi(2) + self.c1 * a
    }
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Academic, Category::Clubs];

    pub fn name(self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::Clubs => "Clubs",
        }
    }

    pub fn weights(self) -> Weights {
        match self {
            Category::Academic => Weights {
                payload: 150.0,
                circuit: 150.0,
                glide: 100.0,
                loading: 100.0,
            },
            Category::Clubs => Weights {
                payload: 200.0,
                circuit: 200.0,
                glide: 150.0,
                loading: 100.0,
            },
        }
    }

    pub fn altitude_polynomial(self) -> AltitudePolynomial {
        match self {
            Category::Academic => AltitudePolynomial {
                c4: 4.3636e-6,
                c3: -0.001215,
                c2: 0.095732,
                c1: -0.86741,
            },
            Category::Clubs => AltitudePolynomial {
                c4: 6.5455e-6,
                c3: -0.001822,
                c2: 0.1436,
                c1: -1.3011,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "academic" | "a" => Ok(Category::Academic),
            "clubs" | "club" | "b" => Ok(Category::Clubs),
            _ => Err(format!("unknown category: {s} (use academic|clubs)")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/category.rs"]
mod tests;
