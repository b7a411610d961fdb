use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::events::{EntryAccepted, PotFunded};
use crate::utils::{enter_core, fund_core};
use crate::{EnterLottery, FundLottery, ValidateTicket};

pub fn enter_lottery(ctx: Context<EnterLottery>, ticket: String, payment: u64) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    let entry_index = enter_core(lottery, ctx.accounts.player.key(), ticket.clone(), payment)?;
    let round = lottery.round;
    let pot_balance = lottery.pot_balance;

    // Collect the stake only after the entry is accepted.
    let ix = system_instruction::transfer(
        &ctx.accounts.player.key(),
        &ctx.accounts.vault.key(),
        payment,
    );
    invoke(
        &ix,
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(EntryAccepted {
        round,
        player: ctx.accounts.player.key(),
        entry_index,
        ticket,
        pot_balance,
    });

    Ok(())
}

pub fn fund_lottery(ctx: Context<FundLottery>, amount: u64) -> Result<()> {
    // Zero-amount deposits are accepted as a no-op.
    if amount == 0 {
        return Ok(());
    }

    let lottery = &mut ctx.accounts.lottery;
    fund_core(lottery, amount)?;
    let round = lottery.round;
    let pot_balance = lottery.pot_balance;

    let ix = system_instruction::transfer(
        &ctx.accounts.funder.key(),
        &ctx.accounts.vault.key(),
        amount,
    );
    invoke(
        &ix,
        &[
            ctx.accounts.funder.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(PotFunded {
        round,
        funder: ctx.accounts.funder.key(),
        amount,
        pot_balance,
    });

    Ok(())
}

pub fn validate_ticket(_ctx: Context<ValidateTicket>, ticket: String) -> Result<bool> {
    Ok(crate::utils::validate_ticket(&ticket))
}
