//! SPF policy analysis.
//!
//! Pragmatic substring rules over the first SPF record; no SPF grammar
//! parsing and no recursive include resolution.

use crate::config::{HIGH_RISK_SPF_INCLUDES, MAX_SPF_INCLUDES};
use crate::dns::RecordSet;
use crate::models::AnalysisResult;

/// Evaluates SPF records already filtered to those containing `v=spf1`.
///
/// Only the first record is considered.
pub fn analyze_spf(records: &RecordSet) -> AnalysisResult {
    let Some(first) = records.first() else {
        return AnalysisResult::single_vulnerability("Missing SPF record");
    };
    let spf = first.to_lowercase();
    let mut result = AnalysisResult::new();

    if spf.contains("+all") {
        result.vulnerability("Overly permissive SPF policy (+all)");
    }
    if HIGH_RISK_SPF_INCLUDES
        .iter()
        .any(|include| spf.contains(include))
    {
        result.vulnerability("Third-party email service included without proper restriction");
    }
    if spf.matches("include:").count() > MAX_SPF_INCLUDES {
        result.vulnerability(format!(
            "Excessive DNS lookups (more than {MAX_SPF_INCLUDES} includes)"
        ));
    }
    if has_ptr_mechanism(&spf) {
        result.vulnerability("Insecure PTR mechanism used");
    }

    if !spf.contains("redirect=") && !spf.contains("-all") {
        result.recommendation("Consider adding '-all' to enforce strict policy");
    }
    if !spf.contains("exp=") {
        result.recommendation("Consider adding exp= modifier to receive explanation on failures");
    }

    result
}

/// `ptr`, `ptr:<domain>` or a qualified form such as `?ptr`.
fn has_ptr_mechanism(spf: &str) -> bool {
    spf.split_whitespace().any(|term| {
        let mechanism = term.trim_start_matches(['+', '-', '~', '?']);
        mechanism == "ptr" || mechanism.starts_with("ptr:") || mechanism.starts_with("ptr/")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(record: &str) -> AnalysisResult {
        analyze_spf(&RecordSet::from(vec![record]))
    }

    #[test]
    fn test_missing_spf() {
        let result = analyze_spf(&RecordSet::empty());
        assert_eq!(result.vulnerabilities(), vec!["Missing SPF record"]);
        assert!(result.recommendations().is_empty());
    }

    #[test]
    fn test_permissive_policy() {
        let result = analyze("v=spf1 +all");
        assert!(result
            .vulnerabilities()
            .contains(&"Overly permissive SPF policy (+all)"));
    }

    #[test]
    fn test_strict_policy_has_no_all_findings() {
        let result = analyze("v=spf1 -all");
        assert!(result.vulnerabilities().iter().all(|v| !v.contains("+all")));
        assert!(!result
            .recommendations()
            .contains(&"Consider adding '-all' to enforce strict policy"));
    }

    #[test]
    fn test_soft_fail_gets_enforcement_recommendation() {
        let result = analyze("v=spf1 include:_spf.google.com ~all");
        assert!(result.vulnerabilities().is_empty());
        assert_eq!(
            result.recommendations(),
            vec![
                "Consider adding '-all' to enforce strict policy",
                "Consider adding exp= modifier to receive explanation on failures",
            ]
        );
    }

    #[test]
    fn test_redirect_suppresses_enforcement_recommendation() {
        let result = analyze("v=spf1 redirect=_spf.example.com");
        assert!(!result
            .recommendations()
            .contains(&"Consider adding '-all' to enforce strict policy"));
    }

    #[test]
    fn test_exp_modifier_suppresses_recommendation() {
        let result = analyze("v=spf1 mx exp=explain.example.com -all");
        assert!(result.recommendations().is_empty());
    }

    #[test]
    fn test_high_risk_include() {
        let result = analyze("v=spf1 include:sendgrid.net -all");
        assert_eq!(
            result.vulnerabilities(),
            vec!["Third-party email service included without proper restriction"]
        );
        let result = analyze("v=spf1 include:MAILGUN.org -all");
        assert_eq!(result.vulnerabilities().len(), 1);
    }

    #[test]
    fn test_include_count_threshold() {
        let ten = format!("v=spf1 {} -all", "include:a.example ".repeat(10));
        assert!(analyze(&ten).vulnerabilities().is_empty());

        let eleven = format!("v=spf1 {} -all", "include:a.example ".repeat(11));
        assert_eq!(
            analyze(&eleven).vulnerabilities(),
            vec!["Excessive DNS lookups (more than 10 includes)"]
        );
    }

    #[test]
    fn test_ptr_mechanism() {
        assert_eq!(
            analyze("v=spf1 ptr -all").vulnerabilities(),
            vec!["Insecure PTR mechanism used"]
        );
        assert_eq!(analyze("v=spf1 ?ptr:example.com -all").vulnerabilities().len(), 1);
        assert!(analyze("v=spf1 include:ptrmail.example -all")
            .vulnerabilities()
            .is_empty());
    }

    #[test]
    fn test_vulnerability_order_is_stable() {
        let result = analyze("v=spf1 ptr include:mailgun.org +all");
        assert_eq!(
            result.vulnerabilities(),
            vec![
                "Overly permissive SPF policy (+all)",
                "Third-party email service included without proper restriction",
                "Insecure PTR mechanism used",
            ]
        );
    }

    #[test]
    fn test_only_first_record_is_used() {
        let records = RecordSet::from(vec!["v=spf1 -all", "v=spf1 +all"]);
        let result = analyze_spf(&records);
        assert!(result.vulnerabilities().is_empty());
    }
}
