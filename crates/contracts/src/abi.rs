//! Solidity bindings of the contracts polypay talks to.

use alloy_sol_types::sol;

sol! {
    /// The subset of ERC20 used for balances and order payments.
    interface IERC20 {
        #[derive(Debug, PartialEq, Eq)]
        function balanceOf(address owner) external view returns (uint256);
        #[derive(Debug, PartialEq, Eq)]
        function decimals() external view returns (uint8);
        #[derive(Debug, PartialEq, Eq)]
        function transfer(address to, uint256 amount) external returns (bool);
    }

    /// Sells tokens against the native currency.
    interface ITokenSale {
        #[derive(Debug, PartialEq, Eq)]
        function buyTokens(uint256 amount) external payable;
    }

    /// Governance contract of the shop DAO.
    interface IDao {
        #[derive(Debug, PartialEq, Eq)]
        function vote(uint256 proposalId, bool support) external;
        #[derive(Debug, PartialEq, Eq)]
        function propose(string description) external returns (uint256);
    }
}
