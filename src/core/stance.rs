// stance normalization: rider-relative rotation -> catalog geometry
use crate::core::types::{ActiveStance, CatalogRotation, NaturalStance, Rotation};

//catalog reference is goofy/normal; regular and switch each mirror, together they cancel
pub fn stance_factor(natural: NaturalStance, active: ActiveStance) -> i64 {
    let mut factor = 1;
    if natural == NaturalStance::Regular {
        factor *= -1;
    }
    if active == ActiveStance::Switch {
        factor *= -1;
    }
    factor
}

//total: every i32 triple mirrors into i64 without overflow
pub fn normalize(rotation: Rotation, natural: NaturalStance, active: ActiveStance) -> CatalogRotation {
    rotation.widen().scaled(stance_factor(natural, active))
}
