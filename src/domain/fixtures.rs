//! Small datasets shared by unit tests

use super::{Dataset, Edition, State};

/// Two states covering every level of the hierarchy
///
/// Acre is listed before Rondônia on purpose: source order differs from id
/// order, which flattened serialization must sort out.
pub(crate) fn sample_dataset() -> Dataset {
    let mut ac = State::new(12, "Acre");
    let vale = ac.add_mesoregion(1202, "Vale do Acre");
    let rio_branco = vale.add_microregion(12004, "Rio Branco");
    rio_branco.add_municipality(1200401, "Rio Branco");
    rio_branco.add_municipality(1200013, "Acrelândia");

    let mut ro = State::new(11, "Rondônia");
    let meso = ro.add_mesoregion(1101, "Madeira-Guaporé");
    let micro = meso.add_microregion(11001, "Porto Velho");
    let pvh = micro.add_municipality(1100205, "Porto Velho");
    let district = pvh.add_district(110020505, "Porto Velho");
    district.add_subdistrict(11002050501, "Centro");
    district.add_subdistrict(11002050502, "Olaria");
    pvh.add_district(110020510, "Abunã");
    micro.add_municipality(1100379, "Alto Alegre dos Parecis");
    meso.add_microregion(11002, "Guajará-Mirim")
        .add_municipality(1100106, "Guajará-Mirim");
    ro.add_mesoregion(1102, "Leste Rondoniense")
        .add_microregion(11006, "Cacoal")
        .add_municipality(1100254, "Santa Rita d'Oeste");

    Dataset::new(Edition::new(2016).unwrap(), vec![ac, ro])
}

/// One state with a single mesoregion and nothing deeper
pub(crate) fn single_branch_dataset() -> Dataset {
    let mut state = State::new(53, "Distrito Federal");
    state.add_mesoregion(5301, "Distrito Federal");
    Dataset::new(Edition::new(2016).unwrap(), vec![state])
}
