use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use anchor_spl::token::{self, Transfer};

use crate::errors::LotteryError;
use crate::events::{OracleRequested, WinnerCountReceived, WinnersSettled};
use crate::state::RequestKind;
use crate::utils::{
    accept_winner_count, accept_winners, issue_request_core, prize_tiers, settle_core,
};
use crate::{FulfillNumberOfWinners, FulfillWinners, LOTTERY_SEED, VAULT_SEED};

pub fn fulfill_number_of_winners(
    ctx: Context<FulfillNumberOfWinners>,
    request_id: [u8; 32],
    count: u8,
) -> Result<()> {
    let lottery_key = ctx.accounts.lottery.key();
    let request_key = ctx.accounts.oracle_request.key();
    let next_key = ctx.accounts.next_request.key();
    let current_slot = Clock::get()?.slot;

    require_keys_eq!(
        ctx.accounts.lottery.oracle_authority,
        ctx.accounts.oracle.key(),
        LotteryError::Unauthorized
    );

    let lottery = &mut ctx.accounts.lottery;
    accept_winner_count(
        lottery,
        &ctx.accounts.oracle_request,
        request_key,
        request_id,
        count,
    )?;

    // Phase two goes out in the same transaction.
    let issued = issue_request_core(lottery, lottery_key, next_key, RequestKind::WinnerSelection)?;

    let round = lottery.round;
    let fee = lottery.oracle_fee;
    let lottery_bump = lottery.bump;

    let next = &mut ctx.accounts.next_request;
    next.lottery = lottery_key;
    next.bump = ctx.bumps.next_request;
    next.request_id = issued.request_id;
    next.kind = RequestKind::WinnerSelection as u8;
    next.job = issued.job;
    next.param_count = issued.param_count;
    next.nonce = issued.nonce;
    next.created_slot = current_slot;

    if fee > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[lottery_bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.fee_vault.to_account_info(),
                    to: ctx.accounts.oracle_fee_account.to_account_info(),
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            fee,
        )?;
    }

    emit!(WinnerCountReceived {
        round,
        request_id,
        count,
    });
    emit!(OracleRequested {
        round,
        request: next_key,
        request_id: issued.request_id,
        kind: RequestKind::WinnerSelection as u8,
        job: issued.job,
        param_count: issued.param_count,
        fee,
    });

    // The consumed request account is closed to the authority by the context.
    Ok(())
}

pub fn fulfill_winners(
    ctx: Context<FulfillWinners>,
    request_id: [u8; 32],
    winner_indices: Vec<u32>,
) -> Result<()> {
    let request_key = ctx.accounts.oracle_request.key();

    require_keys_eq!(
        ctx.accounts.lottery.oracle_authority,
        ctx.accounts.oracle.key(),
        LotteryError::Unauthorized
    );

    let winners = accept_winners(
        &ctx.accounts.lottery,
        &ctx.accounts.oracle_request,
        request_key,
        request_id,
        &winner_indices,
    )?;

    // The winner accounts passed in must line up with the oracle's indices.
    require_keys_eq!(
        ctx.accounts.first_winner.key(),
        winners[0],
        LotteryError::InvalidWinnerSet
    );
    require_keys_eq!(
        ctx.accounts.second_winner.key(),
        winners[1],
        LotteryError::InvalidWinnerSet
    );
    require_keys_eq!(
        ctx.accounts.third_winner.key(),
        winners[2],
        LotteryError::InvalidWinnerSet
    );

    let pot_total = ctx.accounts.lottery.pot_balance;
    let round = ctx.accounts.lottery.round;
    let vault_bump = ctx.accounts.lottery.vault_bump;
    let (first_prize, second_prize, third_prize) = prize_tiers(pot_total)?;

    let total_payout = first_prize
        .checked_add(second_prize)
        .ok_or(LotteryError::MathOverflow)?
        .checked_add(third_prize)
        .ok_or(LotteryError::MathOverflow)?;

    // The vault must stay rent-exempt after paying out.
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.vault.to_account_info().lamports();
    require!(
        vault_lamports >= total_payout.saturating_add(rent_floor),
        LotteryError::InsufficientFunds
    );

    pay_prize(
        &ctx.accounts.vault,
        &ctx.accounts.first_winner,
        &ctx.accounts.system_program,
        vault_bump,
        first_prize,
    )?;
    pay_prize(
        &ctx.accounts.vault,
        &ctx.accounts.second_winner,
        &ctx.accounts.system_program,
        vault_bump,
        second_prize,
    )?;
    pay_prize(
        &ctx.accounts.vault,
        &ctx.accounts.third_winner,
        &ctx.accounts.system_program,
        vault_bump,
        third_prize,
    )?;

    let lottery = &mut ctx.accounts.lottery;
    settle_core(lottery);

    emit!(WinnersSettled {
        round,
        request_id,
        first_winner: winners[0],
        second_winner: winners[1],
        third_winner: winners[2],
        first_prize,
        second_prize,
        third_prize,
        pot_total,
    });

    // The consumed request account is closed to the authority by the context.
    Ok(())
}

fn pay_prize<'info>(
    vault: &UncheckedAccount<'info>,
    winner: &UncheckedAccount<'info>,
    system_program: &Program<'info, System>,
    vault_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let ix = system_instruction::transfer(&vault.key(), &winner.key(), amount);
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, &[vault_bump]];

    invoke_signed(
        &ix,
        &[
            vault.to_account_info(),
            winner.to_account_info(),
            system_program.to_account_info(),
        ],
        &[signer_seeds],
    )?;

    Ok(())
}
