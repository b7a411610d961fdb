use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LotteryError;
use crate::events::OracleAuthorityUpdated;
use crate::state::LotteryState;
use crate::{InitializeLottery, SetOracleAuthority};

pub fn initialize_lottery(
    ctx: Context<InitializeLottery>,
    ticket_price: u64,
    oracle_fee: u64,
    oracle_authority: Pubkey,
    winner_count_job: [u8; 32],
    winner_selection_job: [u8; 32],
) -> Result<()> {
    require!(ticket_price > 0, LotteryError::InvalidTicketPrice);

    let lottery = &mut ctx.accounts.lottery;
    lottery.authority = ctx.accounts.authority.key();
    lottery.bump = ctx.bumps.lottery;

    lottery.oracle_authority = oracle_authority;

    lottery.vault = ctx.accounts.vault.key();
    lottery.vault_bump = ctx.bumps.vault;

    lottery.fee_mint = ctx.accounts.fee_mint.key();
    lottery.fee_vault = ctx.accounts.fee_vault.key();
    lottery.fee_vault_bump = ctx.bumps.fee_vault;
    lottery.oracle_fee = oracle_fee;

    lottery.winner_count_job = winner_count_job;
    lottery.winner_selection_job = winner_selection_job;

    lottery.state = LotteryState::Closed as u8;
    lottery.ticket_price = ticket_price;
    lottery.pot_balance = 0;
    lottery.round = 0;
    lottery.players = Vec::new();

    lottery.request_nonce = 0;
    lottery.pending_request = Pubkey::default(); // no request in flight
    lottery.winner_count = 0;

    lottery.version = INITIAL_VERSION;

    Ok(())
}

pub fn set_oracle_authority(ctx: Context<SetOracleAuthority>, new_oracle: Pubkey) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    require_keys_eq!(
        lottery.authority,
        ctx.accounts.authority.key(),
        LotteryError::Unauthorized
    );

    let old_oracle = lottery.oracle_authority;
    lottery.oracle_authority = new_oracle;

    emit!(OracleAuthorityUpdated {
        old_oracle,
        new_oracle,
    });

    Ok(())
}
