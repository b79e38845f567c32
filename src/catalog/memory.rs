//! An in-memory [`RateCatalog`] built from [`TariffTables`].

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractYear, Market, RatePrice, RateRecord, ServiceCode};

use super::tables::TariffTables;
use super::{LinehaulRateQuery, RateCatalog};

/// A read-only catalog holding every tariff row in memory.
///
/// Lookups scan the relevant table and insist on exactly one match.
///
/// # Example
///
/// ```
/// use tariff_engine::catalog::{InMemoryRateCatalog, TariffTables};
///
/// let catalog = InMemoryRateCatalog::new(TariffTables::default()).unwrap();
/// assert!(catalog.contract_codes().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryRateCatalog {
    contract_ids: HashMap<String, Uuid>,
    contract_years: Vec<ContractYear>,
    tables: TariffTables,
}

impl InMemoryRateCatalog {
    /// Builds a catalog, resolving contract codes to ids.
    ///
    /// Fails with `ConfigParseError` if a contract code appears twice or a
    /// contract year references an unknown contract.
    pub fn new(tables: TariffTables) -> EngineResult<Self> {
        let mut contract_ids = HashMap::new();
        for contract in &tables.contracts {
            if contract_ids
                .insert(contract.code.clone(), contract.id)
                .is_some()
            {
                return Err(EngineError::ConfigParseError {
                    path: "tariff tables".to_string(),
                    message: format!("duplicate contract code {}", contract.code),
                });
            }
        }

        let contract_years = tables
            .contract_years
            .iter()
            .map(|row| {
                let contract_id = contract_ids.get(&row.contract_code).copied().ok_or_else(|| {
                    EngineError::ConfigParseError {
                        path: "tariff tables".to_string(),
                        message: format!(
                            "contract year '{}' references unknown contract {}",
                            row.name, row.contract_code
                        ),
                    }
                })?;
                Ok(ContractYear {
                    contract_id,
                    name: row.name.clone(),
                    start_date: row.start_date,
                    end_date: row.end_date,
                    escalation: row.escalation,
                    escalation_compounded: row.escalation_compounded,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        debug!(
            contracts = contract_ids.len(),
            contract_years = contract_years.len(),
            linehaul_prices = tables.linehaul_prices.len(),
            "Built in-memory rate catalog"
        );

        Ok(Self {
            contract_ids,
            contract_years,
            tables,
        })
    }

    /// The contract codes this catalog knows.
    pub fn contract_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.contract_ids.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    fn contract_id(&self, contract_code: &str) -> EngineResult<Uuid> {
        self.contract_ids.get(contract_code).copied().ok_or_else(|| {
            EngineError::not_found(
                "contract",
                format!("no contract found with code {}", contract_code),
            )
        })
    }
}

/// Returns the only item of `matches`, or a lookup failure.
fn exactly_one<T>(entity: &str, key: impl FnOnce() -> String, matches: Vec<T>) -> EngineResult<T> {
    let count = matches.len();
    let mut iter = matches.into_iter();
    match (iter.next(), count) {
        (Some(item), 1) => Ok(item),
        (None, _) => Err(EngineError::not_found(
            entity,
            format!("no {} found for {}", entity, key()),
        )),
        _ => Err(EngineError::AmbiguousMatch {
            entity: entity.to_string(),
            key: key(),
            count,
        }),
    }
}

impl RateCatalog for InMemoryRateCatalog {
    fn linehaul_rate(&self, query: &LinehaulRateQuery<'_>) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(query.contract_code)?;
        // Rates are only valid inside a contract year.
        self.contract_year(contract_id, query.reference_date)?;

        let matches: Vec<_> = self
            .tables
            .linehaul_prices
            .iter()
            .filter(|row| {
                row.contract_code == query.contract_code
                    && row.service_area == query.service_area
                    && row.is_peak == query.is_peak
                    && row.weight_lower <= query.weight
                    && query.weight <= row.weight_upper
                    && row.miles_lower <= query.distance
                    && query.distance <= row.miles_upper
            })
            .collect();

        let row = exactly_one(
            "domestic linehaul price",
            || {
                format!(
                    "contract {}, service area {}, peak {}, weight {}, distance {}",
                    query.contract_code,
                    query.service_area,
                    query.is_peak,
                    query.weight,
                    query.distance
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::Millicents(row.price_millicents),
        })
    }

    fn service_area_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        service_area: &str,
        is_peak: bool,
    ) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(contract_code)?;
        let matches: Vec<_> = self
            .tables
            .service_area_prices
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.service_area == service_area
                    && row.is_peak == is_peak
            })
            .collect();

        let row = exactly_one(
            "domestic service area price",
            || {
                format!(
                    "contract {}, service {}, service area {}, peak {}",
                    contract_code, service_code, service_area, is_peak
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::Cents(row.price_cents),
        })
    }

    fn other_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        schedule: i64,
        is_peak: bool,
    ) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(contract_code)?;
        let matches: Vec<_> = self
            .tables
            .other_prices
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.schedule == schedule
                    && row.is_peak == is_peak
            })
            .collect();

        let row = exactly_one(
            "domestic other price",
            || {
                format!(
                    "contract {}, service {}, schedule {}, peak {}",
                    contract_code, service_code, schedule, is_peak
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::Cents(row.price_cents),
        })
    }

    fn accessorial_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        schedule: i64,
    ) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(contract_code)?;
        let matches: Vec<_> = self
            .tables
            .accessorial_prices
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.schedule == schedule
            })
            .collect();

        let row = exactly_one(
            "domestic accessorial price",
            || {
                format!(
                    "contract {}, service {}, schedule {}",
                    contract_code, service_code, schedule
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::PerUnitCents(row.per_unit_cents),
        })
    }

    fn intl_accessorial_rate(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        market: Market,
    ) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(contract_code)?;
        let matches: Vec<_> = self
            .tables
            .intl_accessorial_prices
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.market == market
            })
            .collect();

        let row = exactly_one(
            "international accessorial price",
            || {
                format!(
                    "contract {}, service {}, market {}",
                    contract_code, service_code, market
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::PerUnitCents(row.per_unit_cents),
        })
    }

    fn contract_by_code(&self, contract_code: &str) -> EngineResult<Uuid> {
        self.contract_id(contract_code)
    }

    fn shipment_type_factor(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        market: Market,
    ) -> EngineResult<Decimal> {
        self.contract_id(contract_code)?;
        let matches: Vec<_> = self
            .tables
            .shipment_type_factors
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.market == market
            })
            .collect();

        let row = exactly_one(
            "shipment type price",
            || {
                format!(
                    "contract {}, service {}, market {}",
                    contract_code, service_code, market
                )
            },
            matches,
        )?;

        Ok(row.factor)
    }

    fn contract_year(&self, contract_id: Uuid, date: NaiveDate) -> EngineResult<ContractYear> {
        let matches: Vec<_> = self
            .contract_years
            .iter()
            .filter(|year| year.contract_id == contract_id && year.covers(date))
            .cloned()
            .collect();

        exactly_one(
            "contract year",
            || format!("contract {} on {}", contract_id, date),
            matches,
        )
    }

    fn task_order_fee(
        &self,
        contract_code: &str,
        service_code: &ServiceCode,
        date: NaiveDate,
    ) -> EngineResult<RateRecord> {
        let contract_id = self.contract_id(contract_code)?;
        let year = self.contract_year(contract_id, date)?;
        let matches: Vec<_> = self
            .tables
            .task_order_fees
            .iter()
            .filter(|row| {
                row.contract_code == contract_code
                    && &row.service_code == service_code
                    && row.contract_year == year.name
            })
            .collect();

        let row = exactly_one(
            "task order fee",
            || {
                format!(
                    "contract {}, service {}, contract year {}",
                    contract_code, service_code, year.name
                )
            },
            matches,
        )?;

        Ok(RateRecord {
            contract_id,
            price: RatePrice::Cents(row.price_cents),
        })
    }
}
