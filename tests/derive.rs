use fairdraw::{DrawError, MissPolicy, TicketEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, TicketEnum)]
enum Case {
    #[chance(1/2)]
    Knife,
    #[chance(4.5)]
    Gloves,
    #[chance(0)]
    Retired,
    #[chance(95)]
    Sticker,
}

#[derive(Copy, Clone, Debug, TicketEnum)]
enum Broken {
    #[chance(0.0001)]
    Dust,
    #[chance(99.9999)]
    Rest,
}

#[test]
fn entries_follow_declaration_order() {
    let names: Vec<_> = Case::ENTRIES.iter().map(|&(_, name, _)| name).collect();
    assert_eq!(names, ["Knife", "Gloves", "Retired", "Sticker"]);
    assert_eq!(Case::ENTRIES[0].2, 0.5);
    assert_eq!(Case::ENTRIES[3].2, 95.0);
}

#[test]
fn table_from_enum() {
    let table = Case::ticket_table().unwrap();
    assert!(table.is_complete());

    let ranges = table.ranges();
    assert_eq!((ranges[0].start_ticket, ranges[0].end_ticket), (0, 499));
    assert_eq!((ranges[1].start_ticket, ranges[1].end_ticket), (500, 4_999));
    assert!(ranges[2].is_empty());
    assert_eq!((ranges[3].start_ticket, ranges[3].end_ticket), (5_000, 99_999));

    let hit = table.resolve(5_000).unwrap();
    assert_eq!(Case::from_draw(&hit), Some(Case::Sticker));
    let hit = table.resolve(499).unwrap();
    assert_eq!(Case::from_draw(&hit), Some(Case::Knife));
}

#[test]
fn from_draw_rejects_foreign_index() {
    let table = Case::ticket_table()
        .unwrap()
        .with_miss_policy(MissPolicy::FailClosed);
    let mut result = table.resolve(10).unwrap();
    result.index = 17;
    assert_eq!(Case::from_draw(&result), None);
}

#[test]
fn fractional_tickets_are_rejected() {
    assert!(matches!(
        Broken::ticket_table(),
        Err(DrawError::FractionalTickets { index: 0, .. })
    ));
    assert_eq!(Broken::items().len(), 2);
}
