use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use city_scrapers_det::callback::extract_callbacks;
use city_scrapers_det::events::{EventStatus, Meeting};
use city_scrapers_det::response::unwrap_callback_body;
use city_scrapers_det::spider::{DetPoliceDepartment, FEED_URL, RowOutcome};
use scraper::{Html, Selector};

static INITIAL_PAGE: &str = include_str!("files/det_police_department.html");
static POST_RESPONSE: &str = include_str!("files/det_police_department_post.html");

/// All fixture meetings are in early 2018; pin the clock between the
/// January rows and the March row so both statuses appear.
fn processing_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 2, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

fn parse_outcomes() -> Vec<RowOutcome> {
    let spider = DetPoliceDepartment::new();
    let doc = unwrap_callback_body(POST_RESPONSE);
    spider.parse_meetings(&doc, processing_clock())
}

fn parsed_meetings() -> Vec<Meeting> {
    parse_outcomes()
        .into_iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Parsed(meeting) => Some(meeting),
            RowOutcome::Skipped { .. } => None,
        })
        .collect()
}

#[test]
fn form_params_expose_the_callback_identifiers() {
    let page = Html::parse_document(INITIAL_PAGE);
    let callbacks = extract_callbacks(&page);

    let meetings_2018 = &callbacks["dnn_ctr7392_FAQs_lstFAQs_Q2_0"];
    assert_eq!(meetings_2018.section, "FAQs dnn_ctr7392_FAQs");
    assert_eq!(meetings_2018.callback_id, 1716);
}

#[test]
fn initial_page_yields_exactly_one_callback_request() {
    let page = Html::parse_document(INITIAL_PAGE);
    let spider = DetPoliceDepartment::new();

    let request = spider
        .initial_request(&page, FEED_URL)
        .expect("fixture page carries callback declarations");

    assert_eq!(request.prev_call_count, 1);
    assert_eq!(request.url, FEED_URL);

    // The accordions on this ASP.NET page only expand via a form request,
    // so the updated form params must be in the encoded body.
    let params = url::form_urlencoded::parse(request.body().as_bytes())
        .into_owned()
        .collect::<Vec<(String, String)>>();
    let has = |name: &str, value: &str| {
        params
            .iter()
            .any(|(n, v)| n == name && v == value)
    };
    assert!(has("ctx", "1"));
    assert!(has("__DNNCAPISCI", "FAQs dnn_ctr7392_FAQs"));
    assert!(has("__DNNCAPISCP", "1716"));
    assert!(has("__VIEWSTATEGENERATOR", "CA0B0334"));
    assert!(params.iter().any(|(n, _)| n == "__VIEWSTATE"));
}

#[test]
fn callback_response_exposes_data_rows() {
    let doc = unwrap_callback_body(POST_RESPONSE);
    let row = Selector::parse("tr").expect("static selector");
    let data_rows = doc.select(&row).skip(1).count();
    assert!(data_rows > 0, "expected data rows beyond the header");
}

#[test]
fn first_record_matches_the_fixture() {
    let meetings = parsed_meetings();
    let first = &meetings[0];

    assert_eq!(first.name, "Detroit Police Commissioners Meetings");
    assert_eq!(first.event_description, "Swearing-in Ceremony");
    assert_eq!(first.start.date, NaiveDate::from_ymd_opt(2018, 1, 4));
    assert_eq!(first.start.time, NaiveTime::from_hms_opt(15, 0, 0));
    assert_eq!(first.start.note, "");
    assert_eq!(first.end.date, None);
    assert_eq!(first.end.time, None);
    assert_eq!(first.end.note, "");
    assert_eq!(
        first.id,
        "det_police_department/201801041500/x/detroit_police_commissioners_meetings"
    );
    assert_eq!(first.status, EventStatus::Passed);
    assert_eq!(first.sources.len(), 1);
    assert_eq!(
        first.sources[0].url,
        "http://www.detroitmi.gov/Government/Detroit-Police-Commissioners-Meetings"
    );
    assert_eq!(first.sources[0].note, "");
}

#[test]
fn every_record_shares_the_feed_constants() {
    let meetings = parsed_meetings();
    assert!(!meetings.is_empty());

    for meeting in &meetings {
        assert!(!meeting.all_day);
        assert_eq!(meeting.classification, "Board");
        assert_eq!(meeting.item_type, "event");
    }
}

#[test]
fn location_branches_on_start_time() {
    let meetings = parsed_meetings();
    let three_oclock = NaiveTime::from_hms_opt(15, 0, 0);

    for meeting in &meetings {
        let location = &meeting.location;
        assert_eq!(location.neighborhood, "");
        if meeting.start.time == three_oclock {
            assert_eq!(location.name, "Detroit Public Safety Headquarters");
            assert_eq!(location.address, "1301 3rd Ave, Detroit, MI 48226");
        } else {
            assert_eq!(location.name, "Community");
            assert_eq!(location.address, "");
        }
    }
}

#[test]
fn future_meetings_are_tentative() {
    let meetings = parsed_meetings();
    let march = meetings
        .iter()
        .find(|meeting| meeting.start.date == NaiveDate::from_ymd_opt(2018, 3, 8))
        .expect("fixture carries a March meeting");
    assert_eq!(march.status, EventStatus::Tentative);
}

#[test]
fn unparsable_rows_are_skipped_with_a_reason() {
    let outcomes = parse_outcomes();
    let skipped = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Skipped { reason } => Some(reason.as_str()),
            RowOutcome::Parsed(_) => None,
        })
        .collect::<Vec<_>>();

    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].contains("TBD"), "reason was {:?}", skipped[0]);
}

#[test]
fn records_serialize_with_the_underscore_type_key() -> anyhow::Result<()> {
    let meetings = parsed_meetings();
    let value = serde_json::to_value(&meetings[0])?;

    assert_eq!(value["_type"], "event");
    assert_eq!(value["start"]["date"], "2018-01-04");
    assert_eq!(value["start"]["note"], "");
    assert!(value["end"]["date"].is_null());

    Ok(())
}
