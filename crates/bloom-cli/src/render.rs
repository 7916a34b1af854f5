use std::fmt::Write;

use bloom_core::model::AnalysisBundle;
use bloom_core::model::Industry;
use bloom_core::model::PortfolioRecord;
use bloom_core::model::RefinedIdea;
use bloom_core::model::INDUSTRIES;
use bloom_core::state::InsightsTab;

pub fn industries() -> String {
    let mut out = String::new();
    for industry in INDUSTRIES {
        let _ = writeln!(out, "{:<14} {} {}", industry.id(), industry.icon(), industry.name());
    }
    out
}

pub fn candidates(ideas: &[RefinedIdea], highlighted: Option<usize>) -> String {
    let mut out = String::new();
    for (index, idea) in ideas.iter().enumerate() {
        let marker = if highlighted == Some(index) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {}. {}", index + 1, idea.name);
        let _ = writeln!(out, "     problem:  {}", idea.problem);
        let _ = writeln!(out, "     solution: {}", idea.solution);
        let _ = writeln!(out, "     value:    {}", idea.value_proposition);
    }
    out
}

pub fn insights_tab(tab: InsightsTab, idea: &RefinedIdea, bundle: &AnalysisBundle) -> String {
    let mut out = format!("== {} ==\n", tab.label());
    match tab {
        InsightsTab::Overview => {
            let _ = writeln!(out, "{}", idea.name);
            let _ = writeln!(out, "Problem: {}", idea.problem);
            let _ = writeln!(out, "Solution: {}", idea.solution);
            let _ = writeln!(out, "Value: {}", idea.value_proposition);
        }
        InsightsTab::Market => {
            let _ = writeln!(out, "Industry: {}", bundle.market.industry);
            push_list(&mut out, "Top trends", &bundle.market.top_trends);
            push_list(&mut out, "Customer segments", &bundle.market.customer_segments);
        }
        InsightsTab::Competitors => {
            if bundle.competitors.competitors.is_empty() {
                out.push_str("No close competitors found.\n");
            }
            for competitor in &bundle.competitors.competitors {
                let _ = write!(
                    out,
                    "- {}: {}",
                    competitor.name, competitor.short_description
                );
                if let Some(url) = &competitor.url_if_known {
                    let _ = write!(out, " ({url})");
                }
                out.push('\n');
            }
            let _ = writeln!(out, "Market gap: {}", bundle.competitors.market_gap);
        }
        InsightsTab::Risks => {
            push_list(&mut out, "Opportunities", &bundle.risks.opportunities);
            push_list(&mut out, "Risks", &bundle.risks.risks);
            let _ = writeln!(out, "Mitigation: {}", bundle.risks.mitigation);
        }
        InsightsTab::Score => {
            let _ = writeln!(out, "Feasibility: {}/100", bundle.scores.feasibility_score);
            let _ = writeln!(out, "Novelty: {}/100", bundle.scores.novelty_score);
            let _ = writeln!(
                out,
                "Market readiness: {}",
                bundle.scores.market_readiness.label()
            );
        }
        InsightsTab::Partners => {
            if bundle.partners.is_empty() {
                out.push_str("No partner suggestions right now.\n");
            }
            for partner in &bundle.partners {
                let _ = writeln!(
                    out,
                    "- {} ({:.0}% overlap) {} <{}>",
                    partner.name,
                    partner.interest_overlap_score * 100.0,
                    partner.skills.join(", "),
                    partner.contact_hint
                );
            }
        }
    }
    out
}

/// Every insights tab in navigation order, starting from the overview.
pub fn insights(idea: &RefinedIdea, bundle: &AnalysisBundle) -> String {
    let mut out = String::new();
    let mut tab = InsightsTab::Overview;
    loop {
        out.push_str(&insights_tab(tab, idea, bundle));
        out.push('\n');
        tab = tab.next();
        if tab == InsightsTab::Overview {
            break;
        }
    }
    out
}

pub fn portfolio(record: &PortfolioRecord) -> String {
    let bundle = AnalysisBundle::new(
        record.market.clone(),
        record.competitors.clone(),
        record.risks.clone(),
        record.scores.clone(),
        record.partners.clone(),
    );
    let mut out = format!("Portfolio {}\n", record.portfolio_id);
    if let Some(export_ref) = &record.export_ref {
        let _ = writeln!(out, "Download: {export_ref}");
    }
    out.push('\n');
    out.push_str(&insights(&record.idea, &bundle));
    out
}

pub fn industry_hint(input: &str) -> String {
    let known: Vec<&str> = INDUSTRIES.iter().map(|industry| industry.id()).collect();
    format!(
        "unknown industry `{input}`; expected one of: {}",
        known.join(", ")
    )
}

pub fn parse_industry(input: &str) -> Option<Industry> {
    Industry::parse(input)
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title}:");
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}
