//! The two rewrites shipped with the binary.
//!
//! Both collapse inline markup in the dashboard `App.tsx` into extracted
//! components. They are plain [`RewriteRule`] records so each can be tested on
//! its own.

use crate::config::types::{ElementSelector, Scope};
use crate::rules::element::ElementMatcher;
use crate::rules::rewriter::RewriteRule;

/// Replaces the stats grid and the control button row with the extracted
/// `DashboardStats` and `ControlButtons` components.
pub const DASHBOARD_BLOCK: &str = r#"<div className="flex flex-col gap-3 sm:gap-4">
                  <DashboardStats
                    totalOrders={totalOrders}
                    activeOrders={activeOrders}
                    completedOrders={completedOrders}
                    activeHelpersCount={helperSim?.activeHelpers?.length || 0}
                    totalHelpersCount={helpers.length}
                    isHelperSimRunning={helperSim?.running || false}
                    autoSim={autoSim}
                  />
                  <ControlButtons
                    onCreateBatchOrders={createBatchOrders}
                    onAdvanceOrders={advanceOrders}
                    onToggleAutoSim={() => setAutoSim((value) => !value)}
                    autoSim={autoSim}
                    onResetOrders={resetOrders}
                    onToggleHelperSim={helperSim?.toggleRunning || (() => {})}
                    isHelperSimRunning={helperSim?.running || false}
                    onToggleStressTest={() => setStressTestMode((value) => !value)}
                    stressTestMode={stressTestMode}
                    onToggleHomeMode={() => setHomeMode((value) => !value)}
                    homeMode={homeMode}
                    onToggleLaundryFailure={() => setLaundryFailureMode((value) => !value)}
                    laundryFailureMode={laundryFailureMode}
                  />"#;

/// Replaces the whole decision center panel with one wrapping the extracted
/// `DecisionCenter` component. The panel's own opening tag is kept, so running
/// the rule again reproduces the same text.
pub const DECISION_CENTER_BLOCK: &str = r#"<GlassPanel title="DECISION CENTER" subtitle="AI ROUTING ENGINE">
                <DecisionCenter
                  decisionPhase={decisionPhase}
                  decisionStateLabel={decisionStateLabel}
                  onGenerateOrder={handleGenerateSimulationOrder}
                  activeOrders={activeOrders}
                  totalOrders={totalOrders}
                  completedOrders={completedOrders}
                  flashMetrics={flashMetrics}
                  ecoMetrics={ecoMetrics}
                  premiumMetrics={premiumMetrics}
                  lowestGuaranteePlanId={lowestGuaranteePlanId}
                  premiumTrustScore={premiumTrustScore}
                  planMetrics={planMetrics}
                  bestPlan={bestPlan}
                  onStartSimulation={startSimulation}
                  selectedPlan={selectedPlan}
                  laundryLocations={laundryLocations}
                  vehicles={vehicles}
                  houseClients={houseClients}
                  helpers={helpers}
                  planHistory={planHistory}
                />
</GlassPanel>"#;

pub const DASHBOARD_RULE: &str = "dashboard";
pub const DECISION_CENTER_RULE: &str = "decision-center";

/// Stats grid immediately followed by the control button row.
pub fn dashboard_rule() -> RewriteRule {
	let matcher = ElementMatcher::new(
		vec![
			ElementSelector::new("div").with_attribute("className", "grid grid-cols-3 gap-2 sm:gap-3"),
			ElementSelector::new("div").with_attribute("className", "flex flex-wrap gap-2 sm:gap-3"),
		],
		Scope::Outer,
	);
	RewriteRule::new(DASHBOARD_RULE, matcher, DASHBOARD_BLOCK)
}

/// The `DECISION CENTER` glass panel, through its balanced closing tag.
pub fn decision_center_rule() -> RewriteRule {
	let matcher = ElementMatcher::new(
		vec![
			ElementSelector::new("GlassPanel")
				.with_attribute("title", "DECISION CENTER")
				.with_attribute("subtitle", "AI ROUTING ENGINE"),
		],
		Scope::Outer,
	);
	RewriteRule::new(DECISION_CENTER_RULE, matcher, DECISION_CENTER_BLOCK)
}

/// Built-in rules in the order they run.
pub fn builtin_rules() -> Vec<RewriteRule> {
	vec![dashboard_rule(), decision_center_rule()]
}
