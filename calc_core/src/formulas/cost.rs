//! # Cost Formulas
//!
//! Material, labor, and overhead & profit markups. Estimates always compound
//! in the same order:
//!
//! ```text
//! material (+ markup) ─┐
//!                      ├─ subtotal ─ + overhead ─ + profit ─ total
//! labor (+ burden) ────┘
//! ```
//!
//! Profit is taken on subtotal plus overhead.

use serde::{Deserialize, Serialize};

/// Default markup on material cost
pub const DEFAULT_MATERIAL_MARKUP: f64 = 0.15;

/// Default labor burden (payroll taxes, insurance) as a fraction of wages
pub const DEFAULT_LABOR_BURDEN: f64 = 0.35;

/// Default overhead rate
pub const DEFAULT_OVERHEAD: f64 = 0.10;

/// Default profit rate
pub const DEFAULT_PROFIT: f64 = 0.10;

/// Material cost with markup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub material_cost: f64,
    pub markup_amount: f64,
    pub total_cost: f64,
}

/// Labor cost with burden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborCost {
    pub labor_cost: f64,
    pub burden_amount: f64,
    pub total_cost: f64,
}

/// Overhead and profit applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadAndProfit {
    pub overhead_amount: f64,
    pub profit_amount: f64,
    pub total_cost: f64,
}

/// Rates used to run the full cost chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub unit_price: f64,
    pub markup: f64,
    pub labor_hours: f64,
    pub labor_rate: f64,
    pub burden: f64,
    pub overhead: f64,
    pub profit: f64,
}

/// Every step of the cost chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material: MaterialCost,
    pub labor: LaborCost,
    /// material.total_cost + labor.total_cost
    pub subtotal: f64,
    pub overhead_and_profit: OverheadAndProfit,
    /// Final estimate, equal to overhead_and_profit.total_cost
    pub total: f64,
}

/// quantity × unit price, plus markup.
pub fn calculate_material_cost(quantity: f64, unit_price: f64, markup: f64) -> MaterialCost {
    let material_cost = quantity * unit_price;
    let markup_amount = material_cost * markup;
    MaterialCost {
        material_cost,
        markup_amount,
        total_cost: material_cost + markup_amount,
    }
}

/// hours × rate, plus burden.
pub fn calculate_labor_cost(hours: f64, rate: f64, burden: f64) -> LaborCost {
    let labor_cost = hours * rate;
    let burden_amount = labor_cost * burden;
    LaborCost {
        labor_cost,
        burden_amount,
        total_cost: labor_cost + burden_amount,
    }
}

/// Overhead on the subtotal, then profit on subtotal + overhead.
pub fn calculate_overhead_and_profit(subtotal: f64, overhead: f64, profit: f64) -> OverheadAndProfit {
    let overhead_amount = subtotal * overhead;
    let profit_amount = (subtotal + overhead_amount) * profit;
    OverheadAndProfit {
        overhead_amount,
        profit_amount,
        total_cost: subtotal + overhead_amount + profit_amount,
    }
}

/// Run material → labor → overhead → profit for a material quantity.
pub fn calculate_project_cost(quantity: f64, rates: &CostRates) -> CostBreakdown {
    let material = calculate_material_cost(quantity, rates.unit_price, rates.markup);
    let labor = calculate_labor_cost(rates.labor_hours, rates.labor_rate, rates.burden);
    let subtotal = material.total_cost + labor.total_cost;
    let overhead_and_profit = calculate_overhead_and_profit(subtotal, rates.overhead, rates.profit);
    CostBreakdown {
        material,
        labor,
        subtotal,
        overhead_and_profit,
        total: overhead_and_profit.total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_material_cost() {
        let m = calculate_material_cost(10.0, 100.0, 0.1);
        assert!(approx_eq(m.material_cost, 1000.0));
        assert!(approx_eq(m.markup_amount, 100.0));
        assert!(approx_eq(m.total_cost, 1100.0));
    }

    #[test]
    fn test_labor_cost() {
        let l = calculate_labor_cost(8.0, 50.0, DEFAULT_LABOR_BURDEN);
        assert!(approx_eq(l.labor_cost, 400.0));
        assert!(approx_eq(l.burden_amount, 140.0));
        assert!(approx_eq(l.total_cost, 540.0));
    }

    #[test]
    fn test_overhead_and_profit_compounds() {
        // 1000 + 100 overhead = 1100; profit = 110; total = 1210
        let ohp = calculate_overhead_and_profit(1000.0, DEFAULT_OVERHEAD, DEFAULT_PROFIT);
        assert!(approx_eq(ohp.overhead_amount, 100.0));
        assert!(approx_eq(ohp.profit_amount, 110.0));
        assert!(approx_eq(ohp.total_cost, 1210.0));
    }

    #[test]
    fn test_project_cost_chain_order() {
        let rates = CostRates {
            unit_price: 100.0,
            markup: 0.1,
            labor_hours: 8.0,
            labor_rate: 50.0,
            burden: DEFAULT_LABOR_BURDEN,
            overhead: DEFAULT_OVERHEAD,
            profit: DEFAULT_PROFIT,
        };
        let c = calculate_project_cost(10.0, &rates);

        // 1100 material + 540 labor = 1640 subtotal
        assert!(approx_eq(c.subtotal, 1640.0));
        let manual = calculate_overhead_and_profit(
            calculate_material_cost(10.0, 100.0, 0.1).total_cost
                + calculate_labor_cost(8.0, 50.0, DEFAULT_LABOR_BURDEN).total_cost,
            DEFAULT_OVERHEAD,
            DEFAULT_PROFIT,
        );
        assert_eq!(c.total, manual.total_cost);
    }

    #[test]
    fn test_negative_quantity_propagates() {
        let m = calculate_material_cost(-2.0, 50.0, DEFAULT_MATERIAL_MARKUP);
        assert!(m.total_cost < 0.0);
    }
}
