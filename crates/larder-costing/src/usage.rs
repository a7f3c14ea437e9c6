use larder_core::PurchasableItem;
use larder_units::{BaseQuantity, Density, Quantity, Unit, UnitError, from_base};
use rust_decimal::Decimal;

use crate::error::CostError;

/// Cost of consuming `usage` of a purchasable item, priced from its pack.
///
/// A zero usage costs exactly zero and skips unit checks entirely. Otherwise the
/// usage is brought into the base unit of the pack's dimension, crossing mass and
/// volume through the item's density when needed.
pub fn usage_cost(usage: &Quantity, item: &PurchasableItem) -> Result<Decimal, CostError> {
    let usage_base = usage.to_base()?;
    if usage.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let pack = pack_base(item)?;
    let pack_unit = pack.dimension().base_unit();
    let used = from_base(usage_base, pack_unit, item.density)
        .map_err(|source| unresolvable(&item.name, usage.unit, item.pack.unit, source))?;

    price_share(item, pack, used)
}

/// Price of one base unit (gram, milliliter, each) of the item's pack.
pub fn unit_price(item: &PurchasableItem) -> Result<Decimal, CostError> {
    let pack = pack_base(item)?;
    price_share(item, pack, Decimal::ONE)
}

fn pack_base(item: &PurchasableItem) -> Result<BaseQuantity, CostError> {
    if item.pack_price.is_sign_negative() && !item.pack_price.is_zero() {
        return Err(CostError::InvalidPrice {
            item: item.id,
            name: item.name.clone(),
            price: item.pack_price,
        });
    }
    Ok(item.pack.to_base()?)
}

/// `used` base units of the pack, priced as `price * used / pack`.
fn price_share(item: &PurchasableItem, pack: BaseQuantity, used: Decimal) -> Result<Decimal, CostError> {
    if pack.amount().is_zero() {
        if item.pack_price.is_zero() {
            return Ok(Decimal::ZERO);
        }
        return Err(CostError::DivisionByZeroPack {
            item: item.id,
            name: item.name.clone(),
            price: item.pack_price,
        });
    }

    item.pack_price
        .checked_mul(used)
        .and_then(|total| total.checked_div(pack.amount()))
        .ok_or_else(|| CostError::Overflow {
            subject: item.name.clone(),
        })
}

/// Express `usage` in `target`, mapping unit failures to [`CostError::UnresolvableUnit`].
pub(crate) fn quantity_in(
    subject: &str,
    usage: &Quantity,
    target: Unit,
    density: Option<Density>,
) -> Result<Decimal, CostError> {
    let base = usage.to_base()?;
    if usage.is_zero() {
        return Ok(Decimal::ZERO);
    }
    from_base(base, target, density).map_err(|source| unresolvable(subject, usage.unit, target, source))
}

fn unresolvable(subject: &str, usage_unit: Unit, target_unit: Unit, source: UnitError) -> CostError {
    CostError::UnresolvableUnit {
        subject: subject.to_string(),
        usage_unit,
        target_unit,
        source,
    }
}
