use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;
pub use events::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Ticket Lottery",
    project_url: "https://ticket-lottery.org",
    contacts: "email:security@ticket-lottery.org,link:https://github.com/ticket-lottery/ticket-lottery-program/issues",
    policy: "https://github.com/ticket-lottery/ticket-lottery-program/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/ticket-lottery/ticket-lottery-program"
}

declare_id!("ADE77Q6jkgt8R1iWBYFhjwevVjpMJUc4xVTMXLz6b7Qa");

#[program]
pub mod ticket_lottery {
    use super::*;
    use crate::instructions::{admin, entry, lifecycle, oracle};

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        ticket_price: u64,
        oracle_fee: u64,
        oracle_authority: Pubkey,
        winner_count_job: [u8; 32],
        winner_selection_job: [u8; 32],
    ) -> Result<()> {
        admin::initialize_lottery(
            ctx,
            ticket_price,
            oracle_fee,
            oracle_authority,
            winner_count_job,
            winner_selection_job,
        )
    }

    pub fn set_oracle_authority(ctx: Context<SetOracleAuthority>, new_oracle: Pubkey) -> Result<()> {
        admin::set_oracle_authority(ctx, new_oracle)
    }

    // ----------------------------
    // Round lifecycle
    // ----------------------------
    pub fn start_lottery(ctx: Context<StartLottery>) -> Result<()> {
        lifecycle::start_lottery(ctx)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, ticket: String, payment: u64) -> Result<()> {
        entry::enter_lottery(ctx, ticket, payment)
    }

    pub fn fund_lottery(ctx: Context<FundLottery>, amount: u64) -> Result<()> {
        entry::fund_lottery(ctx, amount)
    }

    pub fn validate_ticket(ctx: Context<ValidateTicket>, ticket: String) -> Result<bool> {
        entry::validate_ticket(ctx, ticket)
    }

    pub fn end_lottery(ctx: Context<EndLottery>) -> Result<()> {
        lifecycle::end_lottery(ctx)
    }

    // ----------------------------
    // Oracle fulfillment
    // ----------------------------
    pub fn fulfill_number_of_winners(
        ctx: Context<FulfillNumberOfWinners>,
        request_id: [u8; 32],
        count: u8,
    ) -> Result<()> {
        oracle::fulfill_number_of_winners(ctx, request_id, count)
    }

    pub fn fulfill_winners(
        ctx: Context<FulfillWinners>,
        request_id: [u8; 32],
        winner_indices: Vec<u32>,
    ) -> Result<()> {
        oracle::fulfill_winners(ctx, request_id, winner_indices)
    }

    pub fn retry_oracle_request(
        ctx: Context<RetryOracleRequest>,
        request_id: [u8; 32],
    ) -> Result<()> {
        lifecycle::retry_oracle_request(ctx, request_id)
    }
}
