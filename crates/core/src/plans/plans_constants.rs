/// Duration shared by every built-in plan, in days
pub const DEFAULT_PLAN_DURATION_DAYS: u32 = 30;

/// Built-in catalog rows: (id, price, daily return, name).
///
/// Prices and returns are whole meticais.
pub const DEFAULT_PLANS: [(u32, i64, i64, &str); 6] = [
    (1, 300, 30, "BMW Série 1"),
    (2, 600, 60, "Mercedes-Benz C-Class"),
    (3, 1000, 100, "Toyota Fortuner"),
    (4, 2500, 250, "Mazda CX-5"),
    (5, 5000, 500, "Lamborghini Huracan"),
    (6, 10000, 1000, "Ferrari 488"),
];
