//! UI test cases for the COVID test-management application.
//!
//! Every case is plain data: the target page, the field writes, the
//! submit click, and the expected outcome. The harness supplies all
//! control flow; nothing here talks to a browser directly.
//!
//! Some expected substrings (e.g. "Invalid Mobile Number", "Government
//! ID required") are aspirational fixtures carried over from the source
//! suites — validate them against the real target before relying on
//! them.

#![warn(missing_docs)]

use navegar::{Expectation, Locator, TestCase, TestSuite};

/// New-user registration form
pub const NEW_USER_PATH: &str = "/covid-tms/new-user-testing.php";
/// Registered-user lookup form
pub const REGISTERED_USER_PATH: &str = "/covid-tms/registered-user-testing.php";
/// Staff login form
pub const LOGIN_PATH: &str = "/covid-tms/login.php";
/// Patient search/report form
pub const SEARCH_REPORT_PATH: &str = "/covid-tms/patient-search-report.php";
/// Live dashboard page
pub const DASHBOARD_PATH: &str = "/covid-tms/live-test-updates.php";

// Structural locators carried from the source suites; brittle by nature
// and flagged as such by the harness.
const SIGNUP_SUBMIT_XPATH: &str =
    "/html/body/div/div/div/div/form/div/div[2]/div/div[2]/div[3]/input";
const SEARCH_BUTTON_XPATH: &str = "/html/body/div/div/div/div/form/div/div/div/div/div[2]/input";
const DOWNLOAD_LINK_XPATH: &str =
    "/html/body/div/div/div/div/div/div[2]/div/form/div/div[2]/div/table/tbody/tr/td[8]/a";

/// Submitting the registration form without any input must surface a
/// required-fields error.
#[must_use]
pub fn empty_form_submission() -> TestCase {
    TestCase::new("empty_form_submission", NEW_USER_PATH)
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("All fields are required"),
            Expectation::page_contains("Please fill out this field"),
        ]))
}

/// Full registration walk-through with every field populated.
#[must_use]
pub fn sign_up() -> TestCase {
    TestCase::new("sign_up", NEW_USER_PATH)
        .fill(Locator::id("fullname"), "Swapnil Rajendra Take")
        .fill(Locator::id("mobilenumber"), "8600789879")
        .fill(Locator::id("dob"), "09-04-2000")
        .fill(Locator::id("govtissuedid"), "Adhar")
        .fill(Locator::id("govtidnumber"), "979325686414")
        .fill(Locator::id("address"), "Newasa")
        .fill(Locator::id("state"), "Maharashtra")
        .fill(Locator::id("testtype"), "RT-PCR")
        .fill(Locator::id("birthdaytime"), "22-12-2022 13:20")
        .submit(Locator::xpath(SIGNUP_SUBMIT_XPATH))
}

/// Re-registering an already-registered mobile number must be blocked.
#[must_use]
pub fn duplicate_registration() -> TestCase {
    TestCase::new("duplicate_registration", NEW_USER_PATH)
        .fill(Locator::id("fullname"), "Swapnil Take")
        .fill(Locator::id("mobilenumber"), "8607878789")
        .fill(Locator::id("dob"), "09-04-2000")
        .fill(Locator::id("govtissuedid"), "Aadhar")
        .fill(Locator::id("govtidnumber"), "123456789012")
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("already registered"),
            Expectation::page_contains("User exists"),
        ]))
}

/// A malformed mobile number must be rejected.
#[must_use]
pub fn invalid_mobile_number() -> TestCase {
    TestCase::new("invalid_mobile_number", NEW_USER_PATH)
        .fill(Locator::id("fullname"), "Test User")
        .fill(Locator::id("mobilenumber"), "123")
        .fill(Locator::id("dob"), "01-01-2000")
        .fill(Locator::id("govtissuedid"), "Aadhar")
        .fill(Locator::id("govtidnumber"), "123456789012")
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("Invalid Mobile Number"),
            Expectation::page_contains("Enter valid phone"),
        ]))
}

/// A future date of birth must be rejected.
#[must_use]
pub fn invalid_date_of_birth() -> TestCase {
    TestCase::new("invalid_date_of_birth", NEW_USER_PATH)
        .fill(Locator::id("fullname"), "Test User")
        .fill(Locator::id("mobilenumber"), "9876543210")
        .fill(Locator::id("dob"), "01-01-2030")
        .fill(Locator::id("govtissuedid"), "Aadhar")
        .fill(Locator::id("govtidnumber"), "987654321098")
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("Invalid Date of Birth"),
            Expectation::page_contains("Future date not allowed"),
        ]))
}

/// Registration without a government ID must be rejected.
#[must_use]
pub fn missing_govt_id() -> TestCase {
    TestCase::new("missing_govt_id", NEW_USER_PATH)
        .fill(Locator::id("fullname"), "Test User")
        .fill(Locator::id("mobilenumber"), "9999999999")
        .fill(Locator::id("dob"), "05-05-1999")
        .fill(Locator::id("govtidnumber"), "")
        .submit(Locator::id("submit"))
        .expect(Expectation::any_of([
            Expectation::page_contains("Government ID required"),
            Expectation::page_contains("Please enter ID"),
        ]))
}

/// Looking up a registered mobile number shows the personal-information
/// section.
#[must_use]
pub fn registered_user_lookup() -> TestCase {
    TestCase::new("registered_user_lookup", REGISTERED_USER_PATH)
        .fill(Locator::id("regmobilenumber"), "1234567890")
        .submit(Locator::name("search"))
        .expect(Expectation::page_contains("Personal Information"))
}

/// Staff login with the admin credentials.
#[must_use]
pub fn login() -> TestCase {
    TestCase::new("login", LOGIN_PATH)
        .fill(Locator::name("username"), "admin")
        .fill(Locator::name("inputpwd"), "pass")
        .submit(Locator::name("login"))
}

/// Logging out must clear the session and land back on the login page.
#[must_use]
pub fn logout_redirects_to_login() -> TestCase {
    TestCase::new("logout_redirects_to_login", LOGIN_PATH)
        .fill(Locator::id("username"), "swapnil")
        .fill(Locator::id("password"), "12345")
        .click(Locator::id("login"))
        .click(Locator::id("logout"))
        .expect(Expectation::any_of([
            Expectation::url_contains("login.php"),
            Expectation::page_contains("Login to continue"),
        ]))
}

/// The live dashboard renders without any interaction.
#[must_use]
pub fn dashboard_loads() -> TestCase {
    TestCase::new("dashboard_loads", DASHBOARD_PATH)
        .expect(Expectation::page_contains("Dashboard"))
}

/// Patient search by registered mobile number.
#[must_use]
pub fn patient_report_search() -> TestCase {
    TestCase::new("patient_report_search", SEARCH_REPORT_PATH)
        .fill(Locator::id("searchdata"), "8600789879")
        .submit(Locator::xpath(SEARCH_BUTTON_XPATH))
}

/// Searching for a registered patient redirects to the report page.
#[must_use]
pub fn search_redirects_to_report() -> TestCase {
    TestCase::new("search_redirects_to_report", SEARCH_REPORT_PATH)
        .fill(Locator::id("searchdata"), "1234567890")
        .submit(Locator::xpath(SEARCH_BUTTON_XPATH))
        .expect(Expectation::url_contains("patient-report.php"))
}

/// Full search-then-download chain through the report table.
#[must_use]
pub fn download_report_link() -> TestCase {
    TestCase::new("download_report_link", SEARCH_REPORT_PATH)
        .fill(Locator::id("searchdata"), "1234567890")
        .click(Locator::xpath(SEARCH_BUTTON_XPATH))
        .click(Locator::xpath(DOWNLOAD_LINK_XPATH))
}

/// Registration form cases
#[must_use]
pub fn registration_suite() -> TestSuite {
    TestSuite::new("registration")
        .with_case(empty_form_submission())
        .with_case(sign_up())
        .with_case(duplicate_registration())
        .with_case(invalid_mobile_number())
        .with_case(invalid_date_of_birth())
        .with_case(missing_govt_id())
}

/// Login/logout cases
#[must_use]
pub fn auth_suite() -> TestSuite {
    TestSuite::new("auth")
        .with_case(login())
        .with_case(logout_redirects_to_login())
}

/// Search and report cases
#[must_use]
pub fn report_suite() -> TestSuite {
    TestSuite::new("report")
        .with_case(registered_user_lookup())
        .with_case(patient_report_search())
        .with_case(search_redirects_to_report())
        .with_case(download_report_link())
}

/// Dashboard smoke cases
#[must_use]
pub fn dashboard_suite() -> TestSuite {
    TestSuite::new("dashboard").with_case(dashboard_loads())
}

/// Every COVID-TMS case, in execution order
#[must_use]
pub fn full_suite() -> TestSuite {
    let mut suite = TestSuite::new("covid-tms");
    for group in [
        registration_suite(),
        auth_suite(),
        report_suite(),
        dashboard_suite(),
    ] {
        for case in group.cases {
            suite.add_case(case);
        }
    }
    suite
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_suite_collects_every_group() {
        let suite = full_suite();
        assert_eq!(
            suite.len(),
            registration_suite().len()
                + auth_suite().len()
                + report_suite().len()
                + dashboard_suite().len()
        );
    }

    #[test]
    fn case_names_are_unique() {
        let suite = full_suite();
        let names: HashSet<&str> = suite.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), suite.len());
    }

    #[test]
    fn every_case_targets_a_covid_tms_page() {
        for case in full_suite().cases {
            assert!(
                case.path.starts_with("/covid-tms/"),
                "{} targets {}",
                case.name,
                case.path
            );
        }
    }

    #[test]
    fn structural_locators_are_confined_to_known_cases() {
        let brittle: Vec<String> = full_suite()
            .cases
            .iter()
            .filter(|c| c.uses_structural_locator())
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(
            brittle,
            vec![
                "sign_up".to_string(),
                "patient_report_search".to_string(),
                "search_redirects_to_report".to_string(),
                "download_report_link".to_string(),
            ]
        );
    }

    #[test]
    fn unchecked_cases_match_the_unasserted_sources() {
        let unchecked: Vec<String> = full_suite()
            .cases
            .iter()
            .filter(|c| c.expect.is_unchecked())
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(
            unchecked,
            vec![
                "sign_up".to_string(),
                "login".to_string(),
                "patient_report_search".to_string(),
                "download_report_link".to_string(),
            ]
        );
    }
}
