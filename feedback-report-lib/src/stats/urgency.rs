use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Severity level of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Alta,
    Media,
    Baixa,
}

impl Urgency {
    /// Classify a raw urgency value. Missing or unrecognized values are [`Urgency::Baixa`].
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse().ok()).unwrap_or(Self::Baixa)
    }

    /// Label used in the rendered report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alta => "Alta",
            Self::Media => "Média",
            Self::Baixa => "Baixa",
        }
    }
}

/// Record counts per urgency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyDistribution {
    pub alta: usize,
    pub media: usize,
    pub baixa: usize,
}

impl UrgencyDistribution {
    pub const fn record(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Alta => self.alta += 1,
            Urgency::Media => self.media += 1,
            Urgency::Baixa => self.baixa += 1,
        }
    }

    #[must_use]
    pub const fn count(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::Alta => self.alta,
            Urgency::Media => self.media,
            Urgency::Baixa => self.baixa,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.alta + self.media + self.baixa
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classify_ignores_case_and_whitespace() {
        assert_eq!(Urgency::classify(Some("ALTA")), Urgency::Alta);
        assert_eq!(Urgency::classify(Some(" Media ")), Urgency::Media);
        assert_eq!(Urgency::classify(Some("baixa")), Urgency::Baixa);
    }

    #[test]
    fn test_unknown_or_missing_is_baixa() {
        assert_eq!(Urgency::classify(None), Urgency::Baixa);
        assert_eq!(Urgency::classify(Some("crítica")), Urgency::Baixa);
        assert_eq!(Urgency::classify(Some("")), Urgency::Baixa);
    }

    #[test]
    fn test_iteration_order_matches_report_order() {
        let labels: Vec<_> = Urgency::iter().map(Urgency::label).collect();
        assert_eq!(labels, ["Alta", "Média", "Baixa"]);
    }

    #[test]
    fn test_distribution_counts() {
        let mut distribution = UrgencyDistribution::default();
        for urgency in [Urgency::Baixa, Urgency::Alta, Urgency::Media, Urgency::Alta] {
            distribution.record(urgency);
        }
        assert_eq!(distribution, UrgencyDistribution { alta: 2, media: 1, baixa: 1 });
        assert_eq!(distribution.count(Urgency::Alta), 2);
        assert_eq!(distribution.total(), 4);
    }
}
