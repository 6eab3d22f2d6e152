//! Copy-on-write edits of the user data tree.
//!
//! Every helper clones the tree, applies the mutator to the clone and returns
//! it. If the target is missing or the mutator fails, the caller's tree is
//! untouched and the error is returned instead.

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::plan::Plan;
use crate::models::tile::Tile;
use crate::models::user_data::UserData;

/// Apply `mutator` to a copy of the whole tree.
pub fn with_tree<F>(tree: &UserData, mutator: F) -> Result<UserData, CoreError>
where
    F: FnOnce(&mut UserData) -> Result<(), CoreError>,
{
    let mut next = tree.clone();
    mutator(&mut next)?;
    Ok(next)
}

/// Apply `mutator` to one account in a copy of the tree.
pub fn with_account<F>(tree: &UserData, account_id: Uuid, mutator: F) -> Result<UserData, CoreError>
where
    F: FnOnce(&mut Account) -> Result<(), CoreError>,
{
    with_tree(tree, |data| {
        let account = data
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        mutator(account)
    })
}

/// Apply `mutator` to one plan in a copy of the tree.
pub fn with_plan<F>(
    tree: &UserData,
    account_id: Uuid,
    plan_id: Uuid,
    mutator: F,
) -> Result<UserData, CoreError>
where
    F: FnOnce(&mut Plan) -> Result<(), CoreError>,
{
    with_account(tree, account_id, |account| {
        let plan = account
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))?;
        mutator(plan)
    })
}

/// Apply `mutator` to one tile in a copy of the tree.
pub fn with_tile<F>(
    tree: &UserData,
    account_id: Uuid,
    plan_id: Uuid,
    tile_id: Uuid,
    mutator: F,
) -> Result<UserData, CoreError>
where
    F: FnOnce(&mut Tile) -> Result<(), CoreError>,
{
    with_plan(tree, account_id, plan_id, |plan| {
        let tile = plan
            .tiles
            .iter_mut()
            .find(|t| t.id == tile_id)
            .ok_or_else(|| CoreError::TileNotFound(tile_id.to_string()))?;
        mutator(tile)
    })
}

/// Look up a plan without copying anything.
pub fn find_plan(tree: &UserData, account_id: Uuid, plan_id: Uuid) -> Result<&Plan, CoreError> {
    tree.account(account_id)
        .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?
        .plan(plan_id)
        .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))
}
