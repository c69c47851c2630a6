use super::DentalChart;
use super::ToothStatus;
use crate::domain::models::FormError;

#[test]
fn it_starts_with_32_healthy_teeth() {
    let chart = DentalChart::default();
    assert_eq!(chart.teeth().len(), 32);
    assert_eq!(chart.summary(), vec![(ToothStatus::Healthy, 32)]);
    let upper_right = chart
        .quadrant(0)
        .iter()
        .map(|e| return e.number)
        .collect::<Vec<u8>>();
    assert_eq!(upper_right, vec![18, 17, 16, 15, 14, 13, 12, 11]);
}

#[test]
fn it_paints_teeth_with_tools() {
    let mut chart = DentalChart::default();
    let tooth = chart.apply(16, ToothStatus::Caries).unwrap();
    assert_eq!(tooth.status, ToothStatus::Caries);

    chart.apply(36, ToothStatus::Crown).unwrap();
    assert_eq!(
        chart.summary(),
        vec![
            (ToothStatus::Healthy, 30),
            (ToothStatus::Caries, 1),
            (ToothStatus::Crown, 1)
        ]
    );
}

#[test]
fn it_only_selects_healthy_teeth_with_the_healthy_tool() {
    let mut chart = DentalChart::default();
    let tooth = chart.apply(21, ToothStatus::Healthy).unwrap();
    assert_eq!(tooth.status, ToothStatus::Healthy);
}

#[test]
fn it_restores_treated_teeth_with_the_healthy_tool() {
    let mut chart = DentalChart::default();
    chart.apply(21, ToothStatus::Endodontics).unwrap();
    let tooth = chart.apply(21, ToothStatus::Healthy).unwrap();
    assert_eq!(tooth.status, ToothStatus::Healthy);
}

#[test]
fn it_keeps_notes() {
    let mut chart = DentalChart::default();
    chart.set_note(11, "fractura incisal").unwrap();
    assert_eq!(chart.get(11).unwrap().notes, "fractura incisal");
}

#[test]
fn it_rejects_unknown_teeth() {
    let mut chart = DentalChart::default();
    let err = chart.apply(19, ToothStatus::Caries).unwrap_err();
    assert_eq!(err, FormError::NotFound("tooth 19".to_string()));
}
