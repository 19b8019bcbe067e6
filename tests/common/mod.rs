//! Shared fixtures for integration tests

#![allow(dead_code)]

use geodatabr::domain::{Dataset, Edition, State};

pub fn edition() -> Edition {
    Edition::new(2016).unwrap()
}

/// Two states covering every level, listed out of id order
pub fn dataset() -> Dataset {
    let mut ac = State::new(12, "Acre");
    let rio_branco = ac
        .add_mesoregion(1202, "Vale do Acre")
        .add_microregion(12004, "Rio Branco");
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
    ro.add_mesoregion(1102, "Leste Rondoniense")
        .add_microregion(11006, "Cacoal")
        .add_municipality(1100254, "Santa Rita d'Oeste");

    Dataset::new(edition(), vec![ac, ro])
}

pub fn single_state() -> Dataset {
    Dataset::new(edition(), vec![State::new(53, "Distrito Federal")])
}
