//! Field schema for the happiness report dataset
//!
//! Every plottable column is a variant of [`Field`]. Views never thread
//! free-form column names through rendering; strings are resolved once at the
//! boundary with [`Field::from_name`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A field name that is not part of the dataset schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field '{name}'")]
pub struct UnknownFieldError {
    pub name: String,
}

/// Numeric fields known to the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    LadderScore,
    StandardError,
    UpperWhisker,
    LowerWhisker,
    LoggedGdpPerCapita,
    SocialSupport,
    HealthyLifeExpectancy,
    FreedomToMakeLifeChoices,
    Generosity,
    PerceptionsOfCorruption,
    ExplainedByGdp,
    ExplainedBySocialSupport,
    ExplainedByLifeExpectancy,
    ExplainedByFreedom,
    ExplainedByGenerosity,
    ExplainedByCorruption,
    DystopiaResidual,
    Population,
}

impl Field {
    /// All fields in tooltip order
    pub const ALL: [Field; 18] = [
        Field::LadderScore,
        Field::StandardError,
        Field::UpperWhisker,
        Field::LowerWhisker,
        Field::LoggedGdpPerCapita,
        Field::SocialSupport,
        Field::HealthyLifeExpectancy,
        Field::FreedomToMakeLifeChoices,
        Field::Generosity,
        Field::PerceptionsOfCorruption,
        Field::ExplainedByGdp,
        Field::ExplainedBySocialSupport,
        Field::ExplainedByLifeExpectancy,
        Field::ExplainedByFreedom,
        Field::ExplainedByGenerosity,
        Field::ExplainedByCorruption,
        Field::DystopiaResidual,
        Field::Population,
    ];

    /// Factors offered as x-axis buttons on the bubble chart
    pub const BUBBLE_AXES: [Field; 6] = [
        Field::LoggedGdpPerCapita,
        Field::SocialSupport,
        Field::HealthyLifeExpectancy,
        Field::FreedomToMakeLifeChoices,
        Field::Generosity,
        Field::PerceptionsOfCorruption,
    ];

    /// Column header in the source files
    pub fn column(self) -> &'static str {
        match self {
            Field::LadderScore => "Ladder score",
            Field::StandardError => "Standard error of ladder score",
            Field::UpperWhisker => "upperwhisker",
            Field::LowerWhisker => "lowerwhisker",
            Field::LoggedGdpPerCapita => "Logged GDP per capita",
            Field::SocialSupport => "Social support",
            Field::HealthyLifeExpectancy => "Healthy life expectancy",
            Field::FreedomToMakeLifeChoices => "Freedom to make life choices",
            Field::Generosity => "Generosity",
            Field::PerceptionsOfCorruption => "Perceptions of corruption",
            Field::ExplainedByGdp => "Explained by: Log GDP per capita",
            Field::ExplainedBySocialSupport => "Explained by: Social support",
            Field::ExplainedByLifeExpectancy => "Explained by: Healthy life expectancy",
            Field::ExplainedByFreedom => "Explained by: Freedom to make life choices",
            Field::ExplainedByGenerosity => "Explained by: Generosity",
            Field::ExplainedByCorruption => "Explained by: Perceptions of corruption",
            Field::DystopiaResidual => "Dystopia + residual",
            Field::Population => "pop_est",
        }
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Field::LadderScore => "Happiness Score",
            Field::StandardError => "Standard Error",
            Field::UpperWhisker => "Upper Whisker",
            Field::LowerWhisker => "Lower Whisker",
            Field::LoggedGdpPerCapita => "Logged GDP per Capita",
            Field::SocialSupport => "Social Support",
            Field::HealthyLifeExpectancy => "Healthy Life Expectancy",
            Field::FreedomToMakeLifeChoices => "Freedom to Make Life Choices",
            Field::Generosity => "Generosity",
            Field::PerceptionsOfCorruption => "Perceptions of Corruption",
            Field::ExplainedByGdp => "Explained by Log GDP per Capita",
            Field::ExplainedBySocialSupport => "Explained by Social Support",
            Field::ExplainedByLifeExpectancy => "Explained by Healthy Life Expectancy",
            Field::ExplainedByFreedom => "Explained by Freedom to Make Life Choices",
            Field::ExplainedByGenerosity => "Explained by Generosity",
            Field::ExplainedByCorruption => "Explained by Perceptions of Corruption",
            Field::DystopiaResidual => "Dystopia + Residual",
            Field::Population => "Population",
        }
    }

    /// Stable snake-case key, used in settings files
    pub fn key(self) -> &'static str {
        match self {
            Field::LadderScore => "ladder_score",
            Field::StandardError => "standard_error",
            Field::UpperWhisker => "upper_whisker",
            Field::LowerWhisker => "lower_whisker",
            Field::LoggedGdpPerCapita => "logged_gdp_per_capita",
            Field::SocialSupport => "social_support",
            Field::HealthyLifeExpectancy => "healthy_life_expectancy",
            Field::FreedomToMakeLifeChoices => "freedom_to_make_life_choices",
            Field::Generosity => "generosity",
            Field::PerceptionsOfCorruption => "perceptions_of_corruption",
            Field::ExplainedByGdp => "explained_by_gdp",
            Field::ExplainedBySocialSupport => "explained_by_social_support",
            Field::ExplainedByLifeExpectancy => "explained_by_life_expectancy",
            Field::ExplainedByFreedom => "explained_by_freedom",
            Field::ExplainedByGenerosity => "explained_by_generosity",
            Field::ExplainedByCorruption => "explained_by_corruption",
            Field::DystopiaResidual => "dystopia_residual",
            Field::Population => "population",
        }
    }

    /// Measurement unit shown next to axis titles
    pub fn unit(self) -> &'static str {
        match self {
            Field::LadderScore
            | Field::StandardError
            | Field::UpperWhisker
            | Field::LowerWhisker => "ladder, 0-10",
            Field::LoggedGdpPerCapita => "log USD PPP",
            Field::SocialSupport
            | Field::FreedomToMakeLifeChoices
            | Field::PerceptionsOfCorruption => "share of respondents",
            Field::HealthyLifeExpectancy => "years",
            Field::Generosity => "residual index",
            Field::ExplainedByGdp
            | Field::ExplainedBySocialSupport
            | Field::ExplainedByLifeExpectancy
            | Field::ExplainedByFreedom
            | Field::ExplainedByGenerosity
            | Field::ExplainedByCorruption
            | Field::DystopiaResidual => "ladder points",
            Field::Population => "people",
        }
    }

    /// Axis title, regenerated whenever a view changes its field
    pub fn axis_title(self) -> String {
        format!("{} ({})", self.label(), self.unit())
    }

    /// Descriptions for the low and high end of the field's range
    pub fn extremes(self) -> (&'static str, &'static str) {
        match self {
            Field::LadderScore => ("Low Happiness", "High Happiness"),
            Field::LoggedGdpPerCapita | Field::ExplainedByGdp => ("Less wealth", "More wealth"),
            Field::SocialSupport | Field::ExplainedBySocialSupport => {
                ("Less social support", "More social support")
            }
            Field::HealthyLifeExpectancy | Field::ExplainedByLifeExpectancy => {
                ("Shorter life", "Longer life")
            }
            Field::FreedomToMakeLifeChoices | Field::ExplainedByFreedom => {
                ("Less freedom", "More freedom")
            }
            Field::Generosity | Field::ExplainedByGenerosity => ("Less generous", "More generous"),
            Field::PerceptionsOfCorruption | Field::ExplainedByCorruption => {
                ("Less corruption", "More corruption")
            }
            Field::Population => ("Smaller population", "Larger population"),
            Field::StandardError
            | Field::UpperWhisker
            | Field::LowerWhisker
            | Field::DystopiaResidual => ("Lower", "Higher"),
        }
    }

    /// Format a value of this field for tooltips
    pub fn format_value(self, value: f64) -> String {
        match self {
            Field::Population => group_thousands(value.round() as i64),
            _ => format!("{:.2}", value),
        }
    }

    /// Resolve a column header, label or key, ignoring case and punctuation
    pub fn from_name(name: &str) -> Result<Field, UnknownFieldError> {
        let wanted = squash(name);
        Field::ALL
            .into_iter()
            .find(|field| {
                !wanted.is_empty()
                    && (squash(field.column()) == wanted
                        || squash(field.label()) == wanted
                        || squash(field.key()) == wanted)
            })
            .ok_or_else(|| UnknownFieldError {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s)
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The visual channel a field is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    X,
    Y,
    Size,
    Color,
}

impl AxisKind {
    pub fn label(self) -> &'static str {
        match self {
            AxisKind::X => "X Axis",
            AxisKind::Y => "Y Axis",
            AxisKind::Size => "Size",
            AxisKind::Color => "Color",
        }
    }
}

/// Field choices local to one view instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFields {
    pub x: Field,
    pub y: Field,
    pub size: Field,
    pub color: Field,
}

impl Default for ViewFields {
    fn default() -> Self {
        Self {
            x: Field::LoggedGdpPerCapita,
            y: Field::LadderScore,
            size: Field::Population,
            color: Field::LadderScore,
        }
    }
}

impl ViewFields {
    pub fn get(&self, kind: AxisKind) -> Field {
        match kind {
            AxisKind::X => self.x,
            AxisKind::Y => self.y,
            AxisKind::Size => self.size,
            AxisKind::Color => self.color,
        }
    }

    /// Returns true when the choice actually changed
    pub fn set(&mut self, kind: AxisKind, field: Field) -> bool {
        let slot = match kind {
            AxisKind::X => &mut self.x,
            AxisKind::Y => &mut self.y,
            AxisKind::Size => &mut self.size,
            AxisKind::Color => &mut self.color,
        };
        let changed = *slot != field;
        *slot = field;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_column_label_and_key() {
        assert_eq!(Field::from_name("Logged GDP per capita"), Ok(Field::LoggedGdpPerCapita));
        assert_eq!(Field::from_name("logged_gdp_per_capita"), Ok(Field::LoggedGdpPerCapita));
        assert_eq!(Field::from_name("happiness score"), Ok(Field::LadderScore));
        assert_eq!(Field::from_name("Explained by: Social support"), Ok(Field::ExplainedBySocialSupport));
        assert_eq!(Field::from_name("pop_est"), Ok(Field::Population));
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        let err = Field::from_name("Ladder score in Dystopia").unwrap_err();
        assert_eq!(err.name, "Ladder score in Dystopia");
        assert!(Field::from_name("").is_err());
        assert!("shoe size".parse::<Field>().is_err());
    }

    #[test]
    fn test_every_field_round_trips_through_its_key() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.key()), Ok(field));
            assert_eq!(Field::from_name(field.column()), Ok(field));
        }
    }

    #[test]
    fn test_axis_title_includes_unit() {
        assert_eq!(Field::HealthyLifeExpectancy.axis_title(), "Healthy Life Expectancy (years)");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(Field::Population.format_value(1_412_600_000.0), "1,412,600,000");
        assert_eq!(Field::Population.format_value(950.0), "950");
        assert_eq!(Field::LadderScore.format_value(7.8042), "7.80");
    }

    #[test]
    fn test_view_fields_set_reports_change() {
        let mut fields = ViewFields::default();
        assert!(!fields.set(AxisKind::Y, Field::LadderScore));
        assert!(fields.set(AxisKind::X, Field::Generosity));
        assert_eq!(fields.get(AxisKind::X), Field::Generosity);
    }
}
