/// A lift category with the number of skiers a single unit carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftType {
    pub code: String,
    pub category: String,
    pub capacity: i32,
}

/// A named installation of a registered lift type, referenced by type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lift {
    pub name: String,
    pub type_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slope {
    pub name: String,
    pub difficulty: String,
    pub start_lift: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parking {
    pub name: String,
    pub slots: i32,
}

/// A lift served by a parking, with the unit capacity it had when attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedLift {
    pub name: String,
    pub capacity: i32,
}

/// Outcome of a bulk import of lift types and lifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub lines_read: usize,
    pub types_defined: usize,
    pub lifts_created: usize,
    pub lines_skipped: usize,
}
