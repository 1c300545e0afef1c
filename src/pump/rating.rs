/// 펌프 효율 등급 가이드라인.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyRating {
    /// 60% 미만
    Poor,
    /// 60% ~ 80%
    Fair,
    /// 80% 초과
    Good,
}

impl EfficiencyRating {
    pub fn classify(efficiency_pct: f64) -> Self {
        if efficiency_pct > 80.0 {
            EfficiencyRating::Good
        } else if efficiency_pct >= 60.0 {
            EfficiencyRating::Fair
        } else {
            EfficiencyRating::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EfficiencyRating::Poor => "Poor Efficiency",
            EfficiencyRating::Fair => "Fair Efficiency",
            EfficiencyRating::Good => "Good Efficiency",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            EfficiencyRating::Poor => "Consider pump replacement or maintenance",
            EfficiencyRating::Fair => "Monitor performance and consider optimization",
            EfficiencyRating::Good => "Excellent pump performance",
        }
    }

    /// 번역 키 접두어 (gui.rating.poor 등)
    pub fn key(self) -> &'static str {
        match self {
            EfficiencyRating::Poor => "poor",
            EfficiencyRating::Fair => "fair",
            EfficiencyRating::Good => "good",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(EfficiencyRating::classify(0.0), EfficiencyRating::Poor);
        assert_eq!(EfficiencyRating::classify(59.99), EfficiencyRating::Poor);
        assert_eq!(EfficiencyRating::classify(60.0), EfficiencyRating::Fair);
        assert_eq!(EfficiencyRating::classify(80.0), EfficiencyRating::Fair);
        assert_eq!(EfficiencyRating::classify(80.01), EfficiencyRating::Good);
    }
}
