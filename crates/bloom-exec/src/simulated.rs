//! Deterministic offline [`AnalysisClient`].
//!
//! Backs `bloom --simulate` and the test suites. Every reply is a pure
//! function of its inputs plus the industry of the last refinement; chosen
//! operations can be made to fail and every call is recorded in order.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use bloom_core::error::RemoteError;
use bloom_core::model::AnalysisBundle;
use bloom_core::model::Competitor;
use bloom_core::model::CompetitorSnapshot;
use bloom_core::model::Industry;
use bloom_core::model::MarketInsight;
use bloom_core::model::MarketReadiness;
use bloom_core::model::Partner;
use bloom_core::model::PortfolioRecord;
use bloom_core::model::RefinedIdea;
use bloom_core::model::RiskAssessment;
use bloom_core::model::Session;
use bloom_core::model::ValidationScores;

use crate::client::AnalysisClient;
use crate::client::Operation;
use crate::client::Registration;

pub const SIMULATED_PORTFOLIO_ID: &str = "portfolio-sim-001";

#[derive(Debug, Default)]
struct CallLog {
    calls: Vec<Operation>,
    last_industry: Option<Industry>,
}

#[derive(Debug, Default)]
pub struct SimulatedAnalysisClient {
    failures: HashMap<Operation, RemoteError>,
    ideas: Option<Vec<RefinedIdea>>,
    chat_reply: Option<String>,
    log: Mutex<CallLog>,
}

impl SimulatedAnalysisClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call of `op` fail with `error`.
    pub fn failing(mut self, op: Operation, error: RemoteError) -> Self {
        self.failures.insert(op, error);
        self
    }

    /// Replaces the canned refinement candidates.
    pub fn with_ideas(mut self, ideas: Vec<RefinedIdea>) -> Self {
        self.ideas = Some(ideas);
        self
    }

    pub fn with_chat_reply(mut self, reply: impl Into<String>) -> Self {
        self.chat_reply = Some(reply.into());
        self
    }

    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.iter().filter(|call| **call == op).count()
    }

    pub fn call_log(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CallLog> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, op: Operation) -> Result<(), RemoteError> {
        self.lock().calls.push(op);
        match self.failures.get(&op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn last_industry(&self) -> Option<Industry> {
        self.lock().last_industry
    }
}

#[async_trait]
impl AnalysisClient for SimulatedAnalysisClient {
    async fn refine_idea(
        &self,
        raw_text: &str,
        industry: Industry,
    ) -> Result<Vec<RefinedIdea>, RemoteError> {
        self.record(Operation::RefineIdea)?;
        self.lock().last_industry = Some(industry);
        Ok(self
            .ideas
            .clone()
            .unwrap_or_else(|| canned_ideas(raw_text, industry)))
    }

    async fn market_insight(&self, idea: &RefinedIdea) -> Result<MarketInsight, RemoteError> {
        self.record(Operation::MarketInsight)?;
        Ok(simulated_market(idea, self.last_industry()))
    }

    async fn competitors(&self, idea: &RefinedIdea) -> Result<CompetitorSnapshot, RemoteError> {
        self.record(Operation::Competitors)?;
        Ok(simulated_competitors(idea))
    }

    async fn risk_assessment(&self, _idea: &RefinedIdea) -> Result<RiskAssessment, RemoteError> {
        self.record(Operation::RiskAssessment)?;
        Ok(simulated_risks())
    }

    async fn validation_scores(
        &self,
        _idea: &RefinedIdea,
        market: &MarketInsight,
        competitors: &CompetitorSnapshot,
    ) -> Result<ValidationScores, RemoteError> {
        self.record(Operation::ValidationScores)?;
        Ok(score_validation(market, competitors))
    }

    async fn partners(&self) -> Result<Vec<Partner>, RemoteError> {
        self.record(Operation::Partners)?;
        Ok(demo_partners(self.last_industry()))
    }

    async fn build_portfolio(&self, raw_text: &str) -> Result<PortfolioRecord, RemoteError> {
        self.record(Operation::BuildPortfolio)?;
        let idea = canned_ideas(raw_text, Industry::SaaS)
            .into_iter()
            .next()
            .unwrap_or_default();
        let market = simulated_market(&idea, None);
        let competitors = simulated_competitors(&idea);
        let scores = score_validation(&market, &competitors);
        Ok(PortfolioRecord {
            portfolio_id: SIMULATED_PORTFOLIO_ID.to_string(),
            idea,
            market,
            competitors,
            risks: simulated_risks(),
            scores,
            partners: demo_partners(None),
            export_ref: None,
        })
    }

    async fn send_chat_message(&self, text: &str) -> Result<String, RemoteError> {
        self.record(Operation::Chat)?;
        Ok(self
            .chat_reply
            .clone()
            .unwrap_or_else(|| format!("(offline) You asked: {}", text.trim())))
    }

    async fn render_summary(
        &self,
        idea: &RefinedIdea,
        bundle: &AnalysisBundle,
    ) -> Result<String, RemoteError> {
        self.record(Operation::RenderSummary)?;
        Ok(format!(
            "<h1>{}</h1><p>{}</p><p>Feasibility {} / Novelty {} / Readiness {}</p>",
            idea.name,
            idea.value_proposition,
            bundle.scores.feasibility_score,
            bundle.scores.novelty_score,
            bundle.scores.market_readiness.label()
        ))
    }

    async fn login(&self, email: &str, _password: &str) -> Result<Session, RemoteError> {
        self.record(Operation::Login)?;
        Ok(Session::new("simulated-token", Some(email.to_string())))
    }

    async fn register(
        &self,
        email: &str,
        _password: &str,
        _profile: &Registration,
    ) -> Result<Session, RemoteError> {
        self.record(Operation::Register)?;
        Ok(Session::new("simulated-token", Some(email.to_string())))
    }
}

fn canned_ideas(raw_text: &str, industry: Industry) -> Vec<RefinedIdea> {
    let focus = raw_text.trim();
    vec![
        RefinedIdea {
            name: "Idea Alpha".to_string(),
            problem: format!("{} teams struggle to validate ideas quickly.", industry.name()),
            solution: format!("Structured startup briefs built around: {focus}"),
            value_proposition: "Faster validation with grounded insights in minutes.".to_string(),
        },
        RefinedIdea {
            name: "Idea Beta".to_string(),
            problem: "Founders lack concise market snapshots.".to_string(),
            solution: format!("{} summaries with trends and gaps from public data.", industry.name()),
            value_proposition: "Actionable clarity for early market moves.".to_string(),
        },
        RefinedIdea {
            name: "Idea Gamma".to_string(),
            problem: "Teams need quick partner matches.".to_string(),
            solution: "Profile-based matching of complementary founders.".to_string(),
            value_proposition: "Better teaming via skill and interest overlap.".to_string(),
        },
    ]
}

fn simulated_market(idea: &RefinedIdea, industry: Option<Industry>) -> MarketInsight {
    let text = format!("{} {} {}", idea.problem, idea.solution, idea.value_proposition)
        .to_lowercase();
    let (label, trends, segments): (&str, [&str; 2], [&str; 2]) =
        if text.contains("education") || industry == Some(Industry::EdTech) {
            ("EdTech", ["AI tutors", "Microlearning"], ["Students", "Schools"])
        } else if text.contains("health")
            || text.contains("medical")
            || industry == Some(Industry::HealthTech)
        {
            ("HealthTech", ["Remote care", "Preventative analytics"], ["Clinics", "Patients"])
        } else if text.contains("finance")
            || text.contains("payment")
            || industry == Some(Industry::FinTech)
        {
            ("FinTech", ["Embedded finance", "Fraud prevention"], ["SMBs", "Marketplaces"])
        } else {
            let label = industry.map_or("General", Industry::name);
            (label, ["AI enablement", "Automation"], ["Early adopters", "SMBs"])
        };
    MarketInsight {
        industry: label.to_string(),
        top_trends: trends.iter().map(|t| t.to_string()).collect(),
        customer_segments: segments.iter().map(|s| s.to_string()).collect(),
    }
}

fn simulated_competitors(idea: &RefinedIdea) -> CompetitorSnapshot {
    let mut competitors = vec![Competitor {
        name: "BenchmarkCo".to_string(),
        short_description: "Reference competitor placeholder.".to_string(),
        url_if_known: None,
    }];
    if idea.solution.to_lowercase().contains("matching") {
        competitors.push(Competitor {
            name: "CoFoundersLab".to_string(),
            short_description: "Co-founder matching network.".to_string(),
            url_if_known: Some("https://cofounderslab.com".to_string()),
        });
    }
    CompetitorSnapshot {
        competitors,
        market_gap: "Exploit underserved niche or feature gaps versus nearest rivals.".to_string(),
    }
}

fn simulated_risks() -> RiskAssessment {
    RiskAssessment {
        opportunities: vec![
            "Ride AI adoption wave".to_string(),
            "Early mover in niche".to_string(),
        ],
        risks: vec![
            "Data quality issues".to_string(),
            "Competitive fast followers".to_string(),
        ],
        mitigation: "Pilot with small cohort; refine quickly".to_string(),
    }
}

/// Scoring heuristic of the analysis service: trends lift feasibility,
/// each competitor past the first costs 5, novelty drops 10 per competitor
/// (at most 30).
pub fn score_validation(
    market: &MarketInsight,
    competitors: &CompetitorSnapshot,
) -> ValidationScores {
    let trend_count = market.top_trends.len().min(3) as i64;
    let competitor_count = competitors.competitors.len() as i64;

    let feasibility = 60 + trend_count * 10 - (competitor_count - 1).max(0) * 5;
    let novelty = 80 - (competitor_count * 10).min(30);

    let industry = market.industry.to_lowercase();
    let market_readiness = if industry.contains("health") || industry.contains("finance") {
        MarketReadiness::Medium
    } else if competitor_count <= 1 {
        MarketReadiness::Low
    } else {
        MarketReadiness::High
    };

    ValidationScores {
        feasibility_score: feasibility.clamp(0, 100) as u8,
        novelty_score: novelty.clamp(0, 100) as u8,
        market_readiness,
    }
}

struct PartnerSeed {
    name: &'static str,
    skills: &'static [&'static str],
    overlap: f64,
    contact: &'static str,
}

const EDTECH_SEEDS: &[PartnerSeed] = &[
    PartnerSeed {
        name: "Priya N.",
        skills: &["Curriculum design", "Learning analytics"],
        overlap: 0.82,
        contact: "priya@demo.bizbloom",
    },
    PartnerSeed {
        name: "Tomas R.",
        skills: &["React", "Gamification"],
        overlap: 0.67,
        contact: "tomas@demo.bizbloom",
    },
];

const FINTECH_SEEDS: &[PartnerSeed] = &[
    PartnerSeed {
        name: "Amara O.",
        skills: &["Payments", "Compliance"],
        overlap: 0.79,
        contact: "amara@demo.bizbloom",
    },
    PartnerSeed {
        name: "Leon W.",
        skills: &["Risk modelling", "Python"],
        overlap: 0.64,
        contact: "leon@demo.bizbloom",
    },
];

const HEALTHTECH_SEEDS: &[PartnerSeed] = &[
    PartnerSeed {
        name: "Dr. Ines K.",
        skills: &["Clinical workflows", "HIPAA"],
        overlap: 0.85,
        contact: "ines@demo.bizbloom",
    },
    PartnerSeed {
        name: "Sam P.",
        skills: &["Mobile", "Wearables"],
        overlap: 0.61,
        contact: "sam@demo.bizbloom",
    },
];

const FIELD_SEEDS: &[PartnerSeed] = &[PartnerSeed {
    name: "Kofi A.",
    skills: &["IoT sensors", "Field operations"],
    overlap: 0.74,
    contact: "kofi@demo.bizbloom",
}];

const PLACEHOLDER_SEEDS: &[PartnerSeed] = &[PartnerSeed {
    name: "Partner Placeholder",
    skills: &["Product", "Go-To-Market"],
    overlap: 0.42,
    contact: "placeholder@example.com",
}];

/// Demo co-founder profiles. Never substituted for a failed partner lookup.
fn demo_partners(industry: Option<Industry>) -> Vec<Partner> {
    let seeds = match industry {
        Some(Industry::EdTech) => EDTECH_SEEDS,
        Some(Industry::FinTech) => FINTECH_SEEDS,
        Some(Industry::HealthTech) => HEALTHTECH_SEEDS,
        Some(Industry::AgriTech) | Some(Industry::CleanTech) => FIELD_SEEDS,
        _ => PLACEHOLDER_SEEDS,
    };
    seeds
        .iter()
        .map(|seed| Partner {
            name: seed.name.to_string(),
            skills: seed.skills.iter().map(|skill| skill.to_string()).collect(),
            interest_overlap_score: seed.overlap,
            contact_hint: seed.contact.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn market(industry: &str, trends: usize) -> MarketInsight {
        MarketInsight {
            industry: industry.to_string(),
            top_trends: (0..trends).map(|i| format!("trend {i}")).collect(),
            customer_segments: Vec::new(),
        }
    }

    fn snapshot(count: usize) -> CompetitorSnapshot {
        CompetitorSnapshot {
            competitors: (0..count)
                .map(|i| Competitor {
                    name: format!("Rival {i}"),
                    ..Competitor::default()
                })
                .collect(),
            market_gap: String::new(),
        }
    }

    #[test]
    fn scoring_heuristic() {
        let scores = score_validation(&market("EdTech", 2), &snapshot(1));
        assert_eq!(scores.feasibility_score, 80);
        assert_eq!(scores.novelty_score, 70);
        assert_eq!(scores.market_readiness, MarketReadiness::Low);

        let crowded = score_validation(&market("Retail", 5), &snapshot(4));
        assert_eq!(crowded.feasibility_score, 75);
        assert_eq!(crowded.novelty_score, 50);
        assert_eq!(crowded.market_readiness, MarketReadiness::High);

        let regulated = score_validation(&market("HealthTech", 0), &snapshot(0));
        assert_eq!(regulated.feasibility_score, 60);
        assert_eq!(regulated.novelty_score, 80);
        assert_eq!(regulated.market_readiness, MarketReadiness::Medium);
    }

    #[tokio::test]
    async fn refine_returns_three_candidates_and_logs_call() {
        let client = SimulatedAnalysisClient::new();
        let ideas = client
            .refine_idea("peer tutoring for nurses", Industry::EdTech)
            .await
            .expect("ideas");
        let names: Vec<_> = ideas.iter().map(|idea| idea.name.as_str()).collect();
        assert_eq!(names, vec!["Idea Alpha", "Idea Beta", "Idea Gamma"]);
        assert_eq!(client.calls(Operation::RefineIdea), 1);
    }

    #[tokio::test]
    async fn injected_failure_is_returned_and_still_counted() {
        let client = SimulatedAnalysisClient::new().failing(
            Operation::Partners,
            RemoteError::Transport("offline".to_string()),
        );
        let err = client.partners().await.expect_err("failure");
        assert_eq!(err, RemoteError::Transport("offline".to_string()));
        assert_eq!(client.call_log(), vec![Operation::Partners]);
    }

    #[tokio::test]
    async fn partners_follow_last_refined_industry() {
        let client = SimulatedAnalysisClient::new();
        assert_eq!(
            client.partners().await.expect("partners")[0].name,
            "Partner Placeholder"
        );
        client
            .refine_idea("cheaper cross-border payments", Industry::FinTech)
            .await
            .expect("ideas");
        let partners = client.partners().await.expect("partners");
        assert_eq!(partners[0].name, "Amara O.");
        assert!(partners
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.interest_overlap_score)));
    }
}
