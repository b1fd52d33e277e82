use crate::explanation::advisory::AdvisoryFlag;
use crate::explanation::i18n::ReportStrings;
use crate::explanation::types::*;
use crate::scorer::{ScoreResult, SuitabilityReport};

/// Builds renderer-neutral reports from scoring output
pub struct ReportAssembler;

impl ReportAssembler {
    /// Assemble a report
    ///
    /// Section order: subject details, weather (if supplied), advisories (if
    /// any), crop ranking, largest profile gap per crop, omitted entries (if
    /// any), knowledge hub schemes (if any). Scores render as percentages
    /// with two decimals.
    pub fn assemble(report: &SuitabilityReport, metadata: &ReportMetadata) -> RenderableReport {
        let strings = metadata.language.strings();

        let title = match &metadata.soil_name {
            Some(soil) => format!("{}: {}", strings.report_title, soil),
            None => strings.report_title.to_string(),
        };
        let generated_at = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let mut sections = Vec::with_capacity(7);
        sections.push(Self::subject_section(report, metadata, strings, &generated_at));

        if let Some(weather) = &metadata.weather {
            sections.push(ReportSection {
                key: "weather".to_string(),
                heading: strings.weather.to_string(),
                style: SectionStyle::Fields,
                rows: vec![
                    ReportRow::new(strings.temperature, format!("{:.1}°C", weather.temperature_c)),
                    ReportRow::new(strings.humidity, format!("{:.0}%", weather.humidity_pct)),
                    ReportRow::new(strings.conditions, weather.description.clone()),
                ],
            });
        }

        if !metadata.advisories.is_empty() {
            sections.push(ReportSection {
                key: "advisories".to_string(),
                heading: strings.advisories.to_string(),
                style: SectionStyle::Alerts,
                rows: metadata
                    .advisories
                    .iter()
                    .map(|flag| ReportRow::new(flag.code(), Self::advisory_message(*flag, strings)))
                    .collect(),
            });
        }

        sections.push(ReportSection {
            key: "ranking".to_string(),
            heading: strings.suitability.to_string(),
            style: SectionStyle::Table,
            rows: report
                .results
                .iter()
                .map(|r| {
                    ReportRow::new(
                        format!("{}. {}", r.rank, r.label),
                        format!("{} {}", format_percent(r.score), strings.match_word),
                    )
                })
                .collect(),
        });

        sections.push(ReportSection {
            key: "explanation".to_string(),
            heading: strings.gaps.to_string(),
            style: SectionStyle::Table,
            rows: report
                .results
                .iter()
                .map(|r| ReportRow::new(r.label.clone(), Self::describe_gap(r, metadata, strings)))
                .collect(),
        });

        if !report.omitted.is_empty() {
            sections.push(ReportSection {
                key: "omitted".to_string(),
                heading: strings.not_scored.to_string(),
                style: SectionStyle::Fields,
                rows: report
                    .omitted
                    .iter()
                    .map(|o| ReportRow::new(o.label.clone(), o.reason.display_text()))
                    .collect(),
            });
        }

        if !metadata.schemes.is_empty() {
            sections.push(ReportSection {
                key: "schemes".to_string(),
                heading: strings.schemes.to_string(),
                style: SectionStyle::Fields,
                rows: metadata
                    .schemes
                    .iter()
                    .map(|s| ReportRow::new(s.name.clone(), s.description.clone()))
                    .collect(),
            });
        }

        tracing::debug!("Assembled report '{}' with {} sections", title, sections.len());

        RenderableReport {
            title,
            generated_at,
            language: metadata.language,
            sections,
        }
    }

    fn subject_section(
        report: &SuitabilityReport,
        metadata: &ReportMetadata,
        strings: &ReportStrings,
        generated_at: &str,
    ) -> ReportSection {
        let mut rows = Vec::with_capacity(5);
        if !metadata.subject_name.is_empty() {
            rows.push(ReportRow::new(strings.farmer_name, metadata.subject_name.clone()));
        }
        if !metadata.location.is_empty() {
            rows.push(ReportRow::new(strings.location, metadata.location.clone()));
        }
        if let Some(soil) = &metadata.soil_name {
            rows.push(ReportRow::new(strings.soil_type, soil.clone()));
        }
        rows.push(ReportRow::new(strings.method, report.metric.clone()));
        rows.push(ReportRow::new(strings.generated, generated_at));

        ReportSection {
            key: "subject".to_string(),
            heading: strings.details.to_string(),
            style: SectionStyle::Fields,
            rows,
        }
    }

    fn advisory_message(flag: AdvisoryFlag, strings: &ReportStrings) -> String {
        let text = match flag {
            AdvisoryFlag::PrecipitationImminent => strings.rain_alert,
            AdvisoryFlag::ClearForFertilizer => strings.clear_weather,
        };
        format!("{} {}", flag.icon(), text)
    }

    /// Describe the attribute with the largest absolute gap
    ///
    /// The first attribute wins when several gaps are equally large.
    fn describe_gap(result: &ScoreResult, metadata: &ReportMetadata, strings: &ReportStrings) -> String {
        let largest = result
            .gaps
            .iter()
            .enumerate()
            .fold(None::<(usize, f64)>, |best, (i, &gap)| match best {
                Some((_, b)) if b.abs() >= gap.abs() => best,
                _ => Some((i, gap)),
            });

        let (index, gap) = match largest {
            Some((i, gap)) if gap != 0.0 => (i, gap),
            _ => return strings.matches_requirement.to_string(),
        };

        let name = metadata
            .attribute_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("attribute {}", index + 1));

        // Positive gap: the crop needs more than the soil has
        let direction = if gap > 0.0 {
            strings.below_requirement
        } else {
            strings.above_requirement
        };

        format!("{}: {:.1} {}", name, gap.abs(), direction)
    }
}

/// Score as a percentage with two decimals ("99.74%")
pub fn format_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}
