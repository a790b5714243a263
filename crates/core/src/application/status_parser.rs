// Status output parser
//
// Matches "Status of outlet " <digits> ":" <whitespace>+ ("on" | "off")
// anywhere in the captured output, across line breaks. Everything else is
// ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static STATUS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Status of outlet (\d+):\s+(on|off)").expect("status pattern is valid")
});

/// Power state of one outlet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletPower {
    On,
    Off,
}

/// Typed view of a `-g all` report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    outlets: BTreeMap<u32, OutletPower>,
}

impl StatusReport {
    pub fn parse(text: &str) -> Self {
        let mut outlets = BTreeMap::new();
        for caps in STATUS_PATTERN.captures_iter(text) {
            let Some(outlet) = exact_outlet_number(&caps[1]) else {
                continue;
            };
            // An outlet reported "on" anywhere stays on
            if &caps[2] == "on" {
                outlets.insert(outlet, OutletPower::On);
            } else {
                outlets.entry(outlet).or_insert(OutletPower::Off);
            }
        }
        Self { outlets }
    }

    pub fn outlet(&self, outlet: u32) -> Option<OutletPower> {
        self.outlets.get(&outlet).copied()
    }

    /// States of outlets `1..=max_sockets`; unreported outlets read as off
    pub fn states(&self, max_sockets: u32) -> Vec<bool> {
        (1..=max_sockets)
            .map(|i| self.outlet(i) == Some(OutletPower::On))
            .collect()
    }
}

/// Outlet numbers are compared as written: "01" is not outlet 1
fn exact_outlet_number(digits: &str) -> Option<u32> {
    let outlet: u32 = digits.parse().ok()?;
    (outlet.to_string() == digits).then_some(outlet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_REPORT: &str = "Accessing Gembird #0 USB device 004\n\
                               Status of outlet 1:\toff\n\
                               Status of outlet 2:\ton\n\
                               Status of outlet 3:\ton\n\
                               Status of outlet 4:\toff\n";

    #[test]
    fn test_parse_quad_report() {
        let report = StatusReport::parse(QUAD_REPORT);
        assert_eq!(report.outlet(1), Some(OutletPower::Off));
        assert_eq!(report.outlet(2), Some(OutletPower::On));
        assert_eq!(report.states(4), vec![false, true, true, false]);
    }

    #[test]
    fn test_states_truncate_and_pad() {
        let report = StatusReport::parse("Status of outlet 1: off\nStatus of outlet 2: on\n");
        assert_eq!(report.states(2), vec![false, true]);
        assert_eq!(report.states(1), vec![false]);
        // Missing outlets read as off
        assert_eq!(report.states(4), vec![false, true, false, false]);
    }

    #[test]
    fn test_rejects_malformed_lines() {
        for text in [
            "Status of outlet 1:on",
            "Status of outlet : on",
            "Status of outlet 1: unknown",
            "status of outlet 1: on",
        ] {
            assert_eq!(StatusReport::parse(text), StatusReport::default(), "{}", text);
        }

        let report = StatusReport::parse("  [dev 0] Status of outlet 3:   on");
        assert_eq!(report.outlet(3), Some(OutletPower::On));
    }

    #[test]
    fn test_leading_zero_is_a_different_outlet() {
        let report = StatusReport::parse("Status of outlet 01: on\n");
        assert_eq!(report.outlet(1), None);
        assert_eq!(report.states(1), vec![false]);
    }

    #[test]
    fn test_several_reports_on_one_line() {
        let report = StatusReport::parse("Status of outlet 1: off Status of outlet 2: on\n");
        assert_eq!(report.states(2), vec![false, true]);
    }

    #[test]
    fn test_whitespace_may_span_lines() {
        let report = StatusReport::parse("Status of outlet 2:\n  on\n");
        assert_eq!(report.outlet(2), Some(OutletPower::On));
    }

    #[test]
    fn test_outlet_numbers_do_not_collide() {
        let report = StatusReport::parse("Status of outlet 10: on\nStatus of outlet 1: off\n");
        assert_eq!(report.outlet(1), Some(OutletPower::Off));
        assert_eq!(report.outlet(10), Some(OutletPower::On));
    }

    #[test]
    fn test_on_wins_over_off() {
        let report = StatusReport::parse("Status of outlet 1: off\nStatus of outlet 1: on\n");
        assert_eq!(report.outlet(1), Some(OutletPower::On));
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(StatusReport::parse("").states(1), vec![false]);
    }
}
